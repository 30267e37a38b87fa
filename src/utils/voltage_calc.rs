//! 電源電圧の換算
//!
//! 電源ラインは抵抗分圧してADCに入力しています。
//! ADCで読んだ分圧点の電圧から電源電圧とバッテリー残量の目安を求めます。

/// 分圧点の電圧(mV)から電源電圧(mV)を求める
pub fn supply_millivolts(adc_mv: u16, divider_ratio: f32) -> f32 {
    f32::from(adc_mv) * divider_ratio
}

/// 電源電圧(mV)からバッテリー残量(0-100%)を求める
///
/// `empty_mv` で0%、`full_mv` で100%となる直線近似です。
/// 範囲が不正（`full_mv <= empty_mv`）な場合は0を返します。
///
/// ```
/// use watergate_sensor::utils::voltage_calc::battery_percentage;
///
/// assert_eq!(battery_percentage(3750.0, 3300.0, 4200.0), 50);
/// assert_eq!(battery_percentage(3100.0, 3300.0, 4200.0), 0);
/// ```
pub fn battery_percentage(supply_mv: f32, empty_mv: f32, full_mv: f32) -> u8 {
    if full_mv <= empty_mv {
        return 0;
    }

    let ratio = (supply_mv - empty_mv) / (full_mv - empty_mv);
    (ratio * 100.0).clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_MV: f32 = 3300.0;
    const FULL_MV: f32 = 4200.0;

    #[test]
    fn test_supply_millivolts_with_divider() {
        // 100kΩ/100kΩ 分圧
        assert_eq!(supply_millivolts(1900, 2.0), 3800.0);
        assert_eq!(supply_millivolts(0, 2.0), 0.0);
        assert_eq!(supply_millivolts(3300, 1.0), 3300.0);
    }

    #[test]
    fn test_battery_percentage_lipo_curve() {
        let cases = [
            (3300.0, 0),
            (3525.0, 25),
            (3800.0, 56),
            (4200.0, 100),
        ];
        for (supply_mv, expected) in cases {
            assert_eq!(
                battery_percentage(supply_mv, EMPTY_MV, FULL_MV),
                expected,
                "supply_mv={}",
                supply_mv
            );
        }
    }

    #[test]
    fn test_battery_percentage_clamped() {
        assert_eq!(battery_percentage(2500.0, EMPTY_MV, FULL_MV), 0);
        // USB給電時など満充電電圧を超える場合
        assert_eq!(battery_percentage(5000.0, EMPTY_MV, FULL_MV), 100);
    }

    #[test]
    fn test_battery_percentage_invalid_range() {
        assert_eq!(battery_percentage(3500.0, FULL_MV, EMPTY_MV), 0);
        assert_eq!(battery_percentage(3500.0, 3500.0, 3500.0), 0);
    }
}
