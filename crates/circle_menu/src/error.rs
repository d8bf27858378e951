use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Division count must be between 1 and {max}, got {0}", max = crate::state::DivisionCount::MAX)]
    InvalidDivisionCount(u32),
}
