use crate::core::config_validation::{
    parse_dht_type, validate_battery_range, validate_divider_ratio, validate_hygro_calibration,
    validate_loop_delay, validate_timing, ValidationError,
};
use crate::hardware::DhtModel;

/// 温湿度センサーの既定種別
pub const DHTTYPE: DhtModel = DhtModel::Dht22;

/// 計測サイクルの最小間隔（ミリ秒）
pub const SENSOR_INTERVAL: u64 = 10_000;

/// 土壌湿度センサーの通電後ウォームアップ時間（ミリ秒）
pub const HYGRO_WARMUP_TIME: u64 = 2_000;

/// アプリケーション設定
///
/// この構造体はビルド時に`cfg.toml`ファイルから読み込まれた設定を保持します。
/// キーの一覧は`cfg.toml.example`を参照してください。
#[toml_cfg::toml_config]
pub struct Config {
    #[default(10000)]
    sensor_interval_ms: u64,

    #[default(2000)]
    hygro_warmup_ms: u64,

    #[default(100)]
    loop_delay_ms: u32,

    // 土壌湿度センサーのキャリブレーション（12bit ADC 生値）
    #[default(4095)]
    hygro_dry_raw: i16,

    #[default(0)]
    hygro_wet_raw: i16,

    #[default("DHT22")]
    dht_type: &'static str,

    // 電圧測定設定
    #[default(2.0)] // 100kΩ/100kΩ 分圧
    voltage_divider_ratio: f32,

    #[default(3300.0)]
    battery_min_mv: f32,

    #[default(4200.0)]
    battery_max_mv: f32,
}

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("無効な温湿度センサー種別: {0}")]
    UnknownDhtType(String),
    #[error("設定値が無効です: {0:?}")]
    Invalid(ValidationError),
}

impl From<ValidationError> for ConfigError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::UnknownDhtType(name) => ConfigError::UnknownDhtType(name),
            other => ConfigError::Invalid(other),
        }
    }
}

/// センサーポーラーに渡す設定
#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfig {
    /// 計測サイクルの最小間隔（ミリ秒）
    pub sensor_interval_ms: u64,

    /// 土壌湿度センサーのウォームアップ時間（ミリ秒）
    pub hygro_warmup_ms: u64,

    /// メインループの待機時間（ミリ秒）
    pub loop_delay_ms: u32,

    /// 乾燥時（0%）のADC生値
    pub hygro_dry_raw: i16,

    /// 水中（100%）のADC生値
    pub hygro_wet_raw: i16,

    /// 温湿度センサー種別
    pub dht_model: DhtModel,

    /// 分圧比（入力電圧 / ADC電圧）
    pub voltage_divider_ratio: f32,

    /// バッテリー 0% 相当の電圧（mV）
    pub battery_min_mv: f32,

    /// バッテリー 100% 相当の電圧（mV）
    pub battery_max_mv: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sensor_interval_ms: SENSOR_INTERVAL,
            hygro_warmup_ms: HYGRO_WARMUP_TIME,
            loop_delay_ms: 100,
            hygro_dry_raw: 4095,
            hygro_wet_raw: 0,
            dht_model: DHTTYPE,
            voltage_divider_ratio: 2.0,
            battery_min_mv: 3300.0,
            battery_max_mv: 4200.0,
        }
    }
}

impl SensorConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        let config = CONFIG;

        let sensor_config = SensorConfig {
            sensor_interval_ms: config.sensor_interval_ms,
            hygro_warmup_ms: config.hygro_warmup_ms,
            loop_delay_ms: config.loop_delay_ms,
            hygro_dry_raw: config.hygro_dry_raw,
            hygro_wet_raw: config.hygro_wet_raw,
            dht_model: parse_dht_type(config.dht_type)?,
            voltage_divider_ratio: config.voltage_divider_ratio,
            battery_min_mv: config.battery_min_mv,
            battery_max_mv: config.battery_max_mv,
        };

        sensor_config.validate()?;
        Ok(sensor_config)
    }

    /// 値の組み合わせを検証します
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_timing(
            self.sensor_interval_ms,
            self.hygro_warmup_ms,
            self.dht_model,
        )?;
        validate_loop_delay(self.loop_delay_ms)?;
        validate_hygro_calibration(self.hygro_dry_raw, self.hygro_wet_raw)?;
        validate_divider_ratio(self.voltage_divider_ratio)?;
        validate_battery_range(self.battery_min_mv, self.battery_max_mv)?;
        Ok(())
    }
}
