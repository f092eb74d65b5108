use crate::errors::MotionError;
use keyframe::EasingFunction;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Supported easing functions for tweens and the scroll driver.
///
/// Names follow the `family.direction` convention used by the page scripts
/// (`power3.out`, `expo.out`, `elastic.out(1, 0.3)`); `none` is linear.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Power1Out,
    Power2Out,
    Power2InOut,
    Power3Out,
    SineInOut,
    /// `1 - 2^(-10t)`, the scroll driver's default curve.
    ExpoOut,
    ElasticOut { amplitude: f64, period: f64 },
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::Power1Out
    }
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
            EasingType::Power1Out => keyframe::functions::EaseOutQuad.y(x),
            EasingType::Power2Out => keyframe::functions::EaseOutCubic.y(x),
            EasingType::Power2InOut => keyframe::functions::EaseInOutCubic.y(x),
            EasingType::Power3Out => keyframe::functions::EaseOutQuart.y(x),
            EasingType::SineInOut => -((PI * x).cos() - 1.0) / 2.0,
            EasingType::ExpoOut => {
                if x >= 1.0 {
                    1.0
                } else {
                    (1.0 - 2f64.powf(-10.0 * x)).clamp(0.0, 1.0)
                }
            }
            EasingType::ElasticOut { amplitude, period } => elastic_out(x, *amplitude, *period),
        }
    }
}

impl EasingType {
    /// Evaluates the curve at `t`, clamping the input to [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        self.y(t.clamp(0.0, 1.0))
    }
}

fn elastic_out(x: f64, amplitude: f64, period: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let a = amplitude.max(1.0);
    let base_period = if period > 0.0 { period } else { 0.3 };
    let period = base_period / amplitude.clamp(f64::EPSILON, 1.0);
    let phase = period / TAU * (1.0 / a).asin();
    let omega = TAU / period;
    a * 2f64.powf(-10.0 * x) * ((x - phase) * omega).sin() + 1.0
}

/// Linear interpolation in eased-progress space.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl FromStr for EasingType {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let ease = match name {
            "none" | "linear" => EasingType::Linear,
            "ease_in" => EasingType::EaseIn,
            "ease_out" => EasingType::EaseOut,
            "ease_in_out" => EasingType::EaseInOut,
            "power1.out" | "power1" => EasingType::Power1Out,
            "power2.out" | "power2" => EasingType::Power2Out,
            "power2.inOut" => EasingType::Power2InOut,
            "power3.out" | "power3" => EasingType::Power3Out,
            "sine.inOut" => EasingType::SineInOut,
            "expo.out" | "expo" => EasingType::ExpoOut,
            "elastic.out" | "elastic" => EasingType::ElasticOut {
                amplitude: 1.0,
                period: 0.3,
            },
            _ => return parse_elastic_args(name),
        };
        Ok(ease)
    }
}

// "elastic.out(1, 0.3)"
fn parse_elastic_args(name: &str) -> Result<EasingType, MotionError> {
    let invalid = || MotionError::InvalidEasing(name.to_string());
    let args = name
        .strip_prefix("elastic.out(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let mut parts = args.split(',').map(|p| p.trim().parse::<f64>());
    let amplitude = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    let period = match parts.next() {
        Some(p) => p.map_err(|_| invalid())?,
        None => 0.3,
    };
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(EasingType::ElasticOut { amplitude, period })
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingType::Linear => write!(f, "none"),
            EasingType::EaseIn => write!(f, "ease_in"),
            EasingType::EaseOut => write!(f, "ease_out"),
            EasingType::EaseInOut => write!(f, "ease_in_out"),
            EasingType::Power1Out => write!(f, "power1.out"),
            EasingType::Power2Out => write!(f, "power2.out"),
            EasingType::Power2InOut => write!(f, "power2.inOut"),
            EasingType::Power3Out => write!(f, "power3.out"),
            EasingType::SineInOut => write!(f, "sine.inOut"),
            EasingType::ExpoOut => write!(f, "expo.out"),
            EasingType::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({}, {})", amplitude, period)
            }
        }
    }
}

impl TryFrom<String> for EasingType {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EasingType> for String {
    fn from(value: EasingType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 11] = [
        EasingType::Linear,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::EaseInOut,
        EasingType::Power1Out,
        EasingType::Power2Out,
        EasingType::Power2InOut,
        EasingType::Power3Out,
        EasingType::SineInOut,
        EasingType::ExpoOut,
        EasingType::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        },
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-6, "{} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{} at 1", ease);
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(EasingType::Power3Out.apply(-2.0), 0.0);
        assert_eq!(EasingType::Power3Out.apply(5.0), 1.0);
        assert_eq!(EasingType::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in &ALL[..10] {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b && b < c, "{} not monotonic", ease);
        }
    }

    #[test]
    fn expo_out_matches_formula() {
        let t: f64 = 0.3;
        let expected = 1.0 - 2f64.powf(-10.0 * t);
        assert!((EasingType::ExpoOut.apply(t) - expected).abs() < 1e-12);
    }

    #[test]
    fn power_curves_follow_their_polynomial() {
        let t: f64 = 0.4;
        let cases = [
            (EasingType::Power1Out, 1.0 - (1.0 - t).powi(2)),
            (EasingType::Power2Out, 1.0 - (1.0 - t).powi(3)),
            (EasingType::Power3Out, 1.0 - (1.0 - t).powi(4)),
            (EasingType::Power2InOut, (2.0 * t).powi(3) / 2.0),
        ];
        for (ease, expected) in cases {
            assert!((ease.apply(t) - expected).abs() < 1e-12, "{} at {}", ease, t);
        }
        assert!((EasingType::Power2InOut.apply(0.8) - (1.0 - 0.4f64.powi(3) / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn elastic_overshoots_target() {
        let ease = EasingType::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        };
        let peak = (1..100)
            .map(|i| ease.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn parses_script_names() {
        assert_eq!("power3.out".parse::<EasingType>().unwrap(), EasingType::Power3Out);
        assert_eq!("none".parse::<EasingType>().unwrap(), EasingType::Linear);
        assert_eq!(
            "elastic.out(1.2, 0.4)".parse::<EasingType>().unwrap(),
            EasingType::ElasticOut {
                amplitude: 1.2,
                period: 0.4
            }
        );
        assert!("bouncy".parse::<EasingType>().is_err());
        assert!("elastic.out(1, x)".parse::<EasingType>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for ease in ALL {
            assert_eq!(ease.to_string().parse::<EasingType>().unwrap(), ease);
        }
    }
}
