use std::any::Any;

use chrono::{DateTime, Utc};

use crate::{State, state_assign_impl};

/// Wall clock as seen by computes and commands.
///
/// Front ends refresh it once per frame; tests set it explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    now: DateTime<Utc>,
}

impl Time {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.now
    }
}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.now
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
