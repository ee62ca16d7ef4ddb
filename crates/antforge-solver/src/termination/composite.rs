//! Composite termination (OR).
//!
//! Uses macro-generated tuple implementations, so no boxing is needed.

use super::Termination;
use crate::scope::ColonyScope;

/// Terminates when ANY wrapped termination does.
///
/// The run counts as ended early only if no terminated child is a normal
/// end. A cancellation arriving after the last iteration therefore still
/// reports a complete run.
///
/// # Example
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use std::sync::Arc;
/// use antforge_solver::termination::{
///     ExternalTermination, IterationCountTermination, OrTermination,
/// };
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = OrTermination::new((
///     IterationCountTermination::new(100),
///     ExternalTermination::new(flag),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, colony_scope: &ColonyScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(colony_scope))||+
            }

            fn is_early(&self, colony_scope: &ColonyScope<'_>) -> bool {
                let mut early = false;
                $(
                    if (self.0).$idx.is_terminated(colony_scope) {
                        if !(self.0).$idx.is_early(colony_scope) {
                            return false;
                        }
                        early = true;
                    }
                )+
                early
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
