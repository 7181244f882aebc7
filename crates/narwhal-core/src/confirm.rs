/// Answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Yes,
    No,
    /// Closed without choosing; treated like [`Decision::No`].
    Dismissed,
}

impl Decision {
    pub fn is_yes(self) -> bool {
        self == Decision::Yes
    }
}

/// Modal yes/no channel. Blocks the caller until the user decides.
pub trait Confirmation {
    fn ask_yes_no(&mut self, message: &str) -> Decision;
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> Decision,
{
    fn ask_yes_no(&mut self, message: &str) -> Decision {
        self(message)
    }
}
