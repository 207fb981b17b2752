use crate::app::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    None,
}
