//! Easing curves for spark travel.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maps normalized progress in [0, 1] to eased progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseInOut,
    #[default]
    EaseOut,
}

impl Easing {
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseInOut,
        Easing::EaseOut,
    ];

    /// Resolve a CSS-style easing name. Anything unrecognized eases out.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Easing::Linear,
            "ease-in" => Easing::EaseIn,
            "ease-in-out" => Easing::EaseInOut,
            _ => Easing::EaseOut,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseInOut => "ease-in-out",
            Easing::EaseOut => "ease-out",
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseOut => t * (2.0 - t),
        }
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Easing::from_name(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{} at 0", easing.name());
            assert_eq!(easing.apply(1.0), 1.0, "{} at 1", easing.name());
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in Easing::ALL {
            let mut prev = 0.0;
            for step in 1..=100 {
                let v = easing.apply(step as f64 / 100.0);
                assert!(v >= prev, "{} decreased at step {step}", easing.name());
                prev = v;
            }
        }
    }

    #[test]
    fn midpoints() {
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
        assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
        assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert_eq!(Easing::EaseInOut.apply(0.25), 0.125);
    }

    #[test]
    fn names_roundtrip_and_unknown_eases_out() {
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()), easing);
        }
        assert_eq!(Easing::from_name("cubic-bezier(0,0,1,1)"), Easing::EaseOut);
        assert_eq!(Easing::default(), Easing::EaseOut);
    }
}
