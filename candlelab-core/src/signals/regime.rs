//! Regime gate — preconditions every rule evaluation must pass.
//!
//! The gate converts missing history and hostile regimes into explicit HOLD
//! reasons instead of letting NaN leak into the rule logic. Checks run in a
//! fixed order and the first failure names the specific filter.

use super::params::SignalParams;
use crate::domain::IndicatorFrame;

/// Returns the HOLD reason when the frame fails the regime gate, or `None`
/// when signal rules may be evaluated.
pub fn regime_hold_reason(frame: &IndicatorFrame, params: &SignalParams) -> Option<String> {
    if frame.ma200.is_nan() {
        return Some("MA200 not available — not enough history for the trend filter.".to_string());
    }

    if frame.close() < frame.ma200 {
        return Some(
            "Price below MA200 — the system only trades long in a bull regime.".to_string(),
        );
    }

    if let Some(adx_min) = params.adx_min {
        if !(frame.adx14 >= adx_min) {
            return Some(format!(
                "ADX {:.1} below the {adx_min:.1} trend-strength floor.",
                frame.adx14
            ));
        }
    }

    if let Some(rvol_min) = params.rvol_min {
        if !(frame.rvol20 >= rvol_min) {
            return Some(format!(
                "Relative volume {:.2} below the {rvol_min:.2} liquidity floor.",
                frame.rvol20
            ));
        }
    }

    if let Some(atr_pct_max) = params.atr_pct_max {
        let atr_pct = frame.atr14 / frame.close() * 100.0;
        if !(atr_pct <= atr_pct_max) {
            return Some(format!(
                "ATR {atr_pct:.1}% of price exceeds the {atr_pct_max:.1}% volatility ceiling."
            ));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::test_frames::frame;

    #[test]
    fn ma200_warmup_blocks() {
        let f = frame(|f| f.ma200 = f64::NAN);
        let reason = regime_hold_reason(&f, &SignalParams::default()).unwrap();
        assert!(reason.contains("MA200"));
        assert!(reason.contains("history"));
    }

    #[test]
    fn below_ma200_blocks() {
        let f = frame(|f| {
            f.ma200 = 150.0; // close defaults to 100
        });
        let reason = regime_hold_reason(&f, &SignalParams::default()).unwrap();
        assert!(reason.contains("below MA200"));
    }

    #[test]
    fn above_ma200_passes_default_gate() {
        let f = frame(|f| f.ma200 = 90.0);
        assert!(regime_hold_reason(&f, &SignalParams::default()).is_none());
    }

    #[test]
    fn adx_floor_blocks_when_enabled() {
        let params = SignalParams {
            adx_min: Some(25.0),
            ..SignalParams::default()
        };
        let f = frame(|f| {
            f.ma200 = 90.0;
            f.adx14 = 18.0;
        });
        let reason = regime_hold_reason(&f, &params).unwrap();
        assert!(reason.contains("ADX"));

        let strong = frame(|f| {
            f.ma200 = 90.0;
            f.adx14 = 30.0;
        });
        assert!(regime_hold_reason(&strong, &params).is_none());
    }

    #[test]
    fn adx_nan_blocks_when_floor_enabled() {
        let params = SignalParams {
            adx_min: Some(25.0),
            ..SignalParams::default()
        };
        let f = frame(|f| f.ma200 = 90.0);
        assert!(regime_hold_reason(&f, &params).is_some());
    }

    #[test]
    fn rvol_floor_blocks_when_enabled() {
        let params = SignalParams {
            rvol_min: Some(0.8),
            ..SignalParams::default()
        };
        let f = frame(|f| {
            f.ma200 = 90.0;
            f.rvol20 = 0.4;
        });
        let reason = regime_hold_reason(&f, &params).unwrap();
        assert!(reason.contains("volume"));
    }

    #[test]
    fn atr_ceiling_blocks_when_enabled() {
        let params = SignalParams {
            atr_pct_max: Some(5.0),
            ..SignalParams::default()
        };
        let f = frame(|f| {
            f.ma200 = 90.0;
            f.atr14 = 8.0; // 8% of the default close of 100
        });
        let reason = regime_hold_reason(&f, &params).unwrap();
        assert!(reason.contains("volatility ceiling"));

        let calm = frame(|f| {
            f.ma200 = 90.0;
            f.atr14 = 2.0;
        });
        assert!(regime_hold_reason(&calm, &params).is_none());
    }
}
