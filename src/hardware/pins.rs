/// センサー接続ピン構造体
///
/// ```text
/// Soil hygrometer:
/// - VCC    -> hygro_power (GPIO出力で電源制御)
/// - Signal -> hygro_adc
/// DHT22:
/// - Data   -> air (4.7kΩ プルアップ, オープンドレイン)
/// Battery:
/// - 分圧点 -> voltage_adc
/// ```
pub struct SensorPins<P, H, A, V> {
    /// 土壌湿度センサーの電源制御ピン
    pub hygro_power: P,
    /// 土壌湿度センサーのアナログ入力
    pub hygro_adc: H,
    /// 温湿度センサー
    pub air: A,
    /// 電圧測定用アナログ入力
    pub voltage_adc: V,
}

impl<P, H, A, V> SensorPins<P, H, A, V> {
    /// 個別のピンから作成
    pub fn new(hygro_power: P, hygro_adc: H, air: A, voltage_adc: V) -> Self {
        Self {
            hygro_power,
            hygro_adc,
            air,
            voltage_adc,
        }
    }
}
