use console::Style;
use once_cell::sync::Lazy;

pub struct Palette {
    pub index: Style,
    pub selected: Style,
    pub title: Style,
    pub label: Style,
    pub muted: Style,
    pub time: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

pub static PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    index: Style::new().yellow(),
    selected: Style::new().green().bold(),
    title: Style::new().bold(),
    label: Style::new().cyan(),
    muted: Style::new().dim(),
    time: Style::new().color256(247).italic(),
    success: Style::new().green(),
    warning: Style::new().yellow(),
    error: Style::new().red(),
});
