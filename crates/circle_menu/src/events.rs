/// Emitted once per completed gesture, even when the index did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEvent {
    SelectionChanged(usize),
    Clicked(usize),
}

impl MenuEvent {
    pub fn index(&self) -> usize {
        match self {
            Self::SelectionChanged(i) | Self::Clicked(i) => *i,
        }
    }

    pub fn dispatch<L: MenuListener + ?Sized>(self, listener: &mut L) {
        match self {
            Self::SelectionChanged(i) => listener.on_selection_change(i),
            Self::Clicked(i) => listener.on_clicked(i),
        }
    }
}

pub trait MenuListener {
    /// The circle came to rest on a new (or the same) sector after a drag.
    fn on_selection_change(&mut self, index: usize);

    /// The top sector was tapped without moving.
    fn on_clicked(&mut self, index: usize);
}
