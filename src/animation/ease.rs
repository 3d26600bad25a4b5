//! Easing curves

/// Progress remapping applied to a tween
///
/// Variants follow the `powerN.out` naming: `power1` is quadratic and
/// `power2` cubic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    #[default]
    Power1Out,
    Power2Out,
    Power1InOut,
    Power2In,
}

impl Ease {
    /// Maps linear progress in `0..=1` to eased progress; input is clamped
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) * 0.5
                }
            }
            Ease::Power2In => t * t * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::Power1InOut,
        Ease::Power2In,
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", ease);
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Ease::Power1Out.apply(0.5) > 0.5);
        assert!(Ease::Power2Out.apply(0.5) > Ease::Power1Out.apply(0.5));
        assert!(Ease::Power2In.apply(0.5) < 0.5);
        assert!((Ease::Power1InOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_default_is_power1_out() {
        assert_eq!(Ease::default(), Ease::Power1Out);
        assert!((Ease::default().apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Ease::Linear.apply(-1.0), 0.0);
        assert_eq!(Ease::Linear.apply(3.0), 1.0);
    }
}
