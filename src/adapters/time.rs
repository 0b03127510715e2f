//! Wall-clock adapter.
//!
//! Records are stamped and partitioned by local civil time, so the clock
//! reports the host's local time without an offset.  NTP on the Pi keeps it
//! honest; a Pi that boots without network starts from its last saved time.

use chrono::{Local, NaiveDateTime};

use crate::app::ports::Clock;

/// [`Clock`] backed by the operating system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
