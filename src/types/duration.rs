use core::fmt;
use core::time;

use super::Duration;

const NANOS_PER_SECOND: i32 = 1_000_000_000;
const NANOS_MAX: i32 = NANOS_PER_SECOND - 1;

impl Duration {
    /// Normalizes the duration to a canonical format: `nanos` within
    /// `(-1s, 1s)` and carrying the same sign as `seconds`. Overflow
    /// saturates at the greatest or least representable duration.
    pub fn normalize(&mut self) {
        if self.nanos <= -NANOS_PER_SECOND || self.nanos >= NANOS_PER_SECOND {
            if let Some(seconds) = self
                .seconds
                .checked_add((self.nanos / NANOS_PER_SECOND) as i64)
            {
                self.seconds = seconds;
                self.nanos %= NANOS_PER_SECOND;
            } else if self.nanos < 0 {
                self.seconds = i64::MIN;
                self.nanos = -NANOS_MAX;
            } else {
                self.seconds = i64::MAX;
                self.nanos = NANOS_MAX;
            }
        }

        if self.seconds < 0 && self.nanos > 0 {
            if let Some(seconds) = self.seconds.checked_add(1) {
                self.seconds = seconds;
                self.nanos -= NANOS_PER_SECOND;
            } else {
                debug_assert_eq!(self.seconds, i64::MAX);
                self.nanos = NANOS_MAX;
            }
        } else if self.seconds > 0 && self.nanos < 0 {
            if let Some(seconds) = self.seconds.checked_sub(1) {
                self.seconds = seconds;
                self.nanos += NANOS_PER_SECOND;
            } else {
                debug_assert_eq!(self.seconds, i64::MIN);
                self.nanos = -NANOS_MAX;
            }
        }
    }
}

impl TryFrom<time::Duration> for Duration {
    type Error = DurationError;

    /// Converts a `std::time::Duration` to a `Duration`, failing if the duration is too large.
    fn try_from(duration: time::Duration) -> Result<Duration, DurationError> {
        let seconds = i64::try_from(duration.as_secs()).map_err(|_| DurationError::OutOfRange)?;
        let nanos = duration.subsec_nanos() as i32;

        let mut duration = Duration {
            seconds,
            nanos,
            ..Default::default()
        };
        duration.normalize();
        Ok(duration)
    }
}

impl TryFrom<Duration> for time::Duration {
    type Error = DurationError;

    /// Converts a `Duration` to a `std::time::Duration`, failing if the duration is negative.
    fn try_from(mut duration: Duration) -> Result<time::Duration, DurationError> {
        duration.normalize();
        if duration.seconds >= 0 && duration.nanos >= 0 {
            Ok(time::Duration::new(
                duration.seconds as u64,
                duration.nanos as u32,
            ))
        } else {
            Err(DurationError::NegativeDuration(time::Duration::new(
                duration.seconds.unsigned_abs(),
                duration.nanos.unsigned_abs(),
            )))
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = self.clone();
        d.normalize();
        if d.seconds < 0 || d.nanos < 0 {
            write!(f, "-")?;
        }
        write!(f, "{}", d.seconds.unsigned_abs())?;

        // Format subseconds to either nothing, millis, micros, or nanos.
        let nanos = d.nanos.unsigned_abs();
        if nanos == 0 {
            write!(f, "s")
        } else if nanos % 1_000_000 == 0 {
            write!(f, ".{:03}s", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            write!(f, ".{:06}s", nanos / 1_000)
        } else {
            write!(f, ".{:09}s", nanos)
        }
    }
}

/// A duration handling error.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DurationError {
    /// Indicates failure to convert a [`Duration`] to a `std::time::Duration`
    /// because the duration is negative. The included `std::time::Duration`
    /// matches the magnitude of the original negative [`Duration`].
    NegativeDuration(time::Duration),

    /// Indicates failure to convert a `std::time::Duration` to a
    /// [`Duration`] because its magnitude exceeds what [`Duration`] can
    /// represent.
    OutOfRange,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::NegativeDuration(duration) => {
                write!(f, "failed to convert negative duration: {:?}", duration)
            }
            DurationError::OutOfRange => {
                write!(f, "failed to convert duration out of range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DurationError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn check_duration_roundtrip(
            seconds in u64::arbitrary(),
            nanos in 0u32..1_000_000_000u32,
        ) {
            let std_duration = time::Duration::new(seconds, nanos);
            let duration = match Duration::try_from(std_duration) {
                Ok(duration) => duration,
                Err(_) => return Err(TestCaseError::reject("duration out of range")),
            };
            prop_assert_eq!(time::Duration::try_from(duration.clone()).unwrap(), std_duration);

            if std_duration != time::Duration::default() {
                let negative = Duration {
                    seconds: -duration.seconds,
                    nanos: -duration.nanos,
                    ..Default::default()
                };

                prop_assert_eq!(
                    time::Duration::try_from(negative),
                    Err(DurationError::NegativeDuration(std_duration))
                );
            }
        }
    }

    fn duration(seconds: i64, nanos: i32) -> Duration {
        Duration {
            seconds,
            nanos,
            ..Default::default()
        }
    }

    #[test]
    fn check_duration_normalize() {
        #[rustfmt::skip] // Don't mangle the table formatting.
        let cases = [
            // --- Table of test cases ---
            //        test seconds      test nanos  expected seconds  expected nanos
            (line!(),            0,     NANOS_MAX,                0,      NANOS_MAX),
            (line!(),            0,  NANOS_PER_SECOND,            1,              0),
            (line!(),            0, -NANOS_PER_SECOND,           -1,              0),
            (line!(),            1,            -1,                0,      NANOS_MAX),
            (line!(),           -1,             1,                0,     -NANOS_MAX),
            (line!(),            2, -NANOS_PER_SECOND - 1,        0,      NANOS_MAX),
            (line!(),     i64::MAX,  NANOS_PER_SECOND,     i64::MAX,      NANOS_MAX),
            (line!(),     i64::MIN, -NANOS_PER_SECOND,     i64::MIN,     -NANOS_MAX),
        ];

        for case in cases.iter() {
            let mut test_duration = duration(case.1, case.2);
            test_duration.normalize();

            assert_eq!(
                test_duration,
                duration(case.3, case.4),
                "test case on line {} failed",
                case.0
            );
        }
    }

    #[test]
    fn check_duration_display() {
        assert_eq!(duration(1, 500_000_000).to_string(), "1.500s");
        assert_eq!(duration(86_400, 0).to_string(), "86400s");
        assert_eq!(duration(0, -1_000).to_string(), "-0.000001s");
        assert_eq!(duration(-3, -5).to_string(), "-3.000000005s");
    }
}
