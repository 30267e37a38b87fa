/// 土壌湿度計算ユーティリティ

/// 土壌湿度センサーの生値をパーセンテージに変換する
///
/// 乾燥時の生値を 0%、水中の生値を 100% として線形に補間し、
/// 結果を 0.0〜100.0 にクランプします。抵抗式・静電容量式どちらの
/// プローブも「湿るほど値が下がる」ため、通常は `dry_raw > wet_raw` です。
///
/// # Arguments
/// - `raw`: ADC生値
/// - `dry_raw`: 乾燥時の生値（0%相当）
/// - `wet_raw`: 水中の生値（100%相当）
///
/// # Returns
/// - 0.0-100.0: 土壌湿度（%）。`dry_raw == wet_raw` の場合は 0.0
///
/// # Examples
/// ```
/// use watergate_sensor::utils::hygro_calc::hyg_to_percentage;
///
/// let percent = hyg_to_percentage(2048, 4096, 0);
/// assert_eq!(percent, 50.0);
/// ```
pub fn hyg_to_percentage(raw: i16, dry_raw: i16, wet_raw: i16) -> f32 {
    let span = wet_raw as f32 - dry_raw as f32;
    if span == 0.0 {
        return 0.0;
    }

    ((raw as f32 - dry_raw as f32) / span * 100.0).clamp(0.0, 100.0)
}
