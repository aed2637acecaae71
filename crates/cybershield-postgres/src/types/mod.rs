//! Constraint violations and other custom types.

mod constraint;

pub use self::constraint::{
    AccountConstraints, ConstraintCategory, ConstraintViolation, VaultEntryConstraints,
};
