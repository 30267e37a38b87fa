/// コアシステムモジュール
pub mod config;
pub mod config_validation;
pub mod poll_timer;
pub mod sensor_poller;
pub mod sensor_reading;

pub use config::{ConfigError, SensorConfig, DHTTYPE, HYGRO_WARMUP_TIME, SENSOR_INTERVAL};
pub use config_validation::ValidationError;
pub use poll_timer::PollTimer;
pub use sensor_poller::{SensorError, SensorPoller};
pub use sensor_reading::{HygroReading, SensorReading, VoltageReading};
