/*!
 * # Watergate Sensor Library
 *
 * 水門ノードのセンサー（土壌湿度・温湿度・電圧）を周期的に読み取るライブラリ
 *
 * ## モジュール構成
 * - `core`: 設定、ポーリングのタイミング管理、センサーポーラー、測定データ
 * - `hardware`: ハードウェア抽象（時計、ADC、DHTドライバー、ピン構成）
 * - `utils`: ハードウェア非依存の変換関数
 *
 * ESP32向けの実装は `esp` フィーチャーで有効になります。
 * フィーチャー無効時は `hardware::mock` のモックでホスト上のテストが可能です。
 */

pub mod core;
pub mod hardware;
pub mod utils;

// 内部で使用する型をまとめてエクスポート
pub use self::core::{
    ConfigError, HygroReading, PollTimer, SensorConfig, SensorError, SensorPoller, SensorReading,
    VoltageReading, DHTTYPE, HYGRO_WARMUP_TIME, SENSOR_INTERVAL,
};
pub use hardware::{AirReading, AirSensor, AnalogChannel, Clock, Dht, DhtError, DhtModel, SensorPins};

/// ライブラリのバージョン
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
