use std::fmt;

/// One of the two player markers that can occupy a cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Counter {
    O,
    X,
}

impl Counter {
    /// The marker of the other player
    pub fn other(self) -> Self {
        match self {
            Counter::O => Counter::X,
            Counter::X => Counter::O,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Counter::O => 'O',
            Counter::X => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'O' | 'o' => Some(Counter::O),
            'X' | 'x' => Some(Counter::X),
            _ => None,
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
