/// ハードウェア制御モジュール
pub mod analog;
pub mod clock;
pub mod dht;
pub mod pins;

#[cfg(feature = "esp")]
pub mod esp;

// Mock実装（テストとnon-espビルドで使用可能）
#[cfg(not(feature = "esp"))]
pub mod mock;

pub use analog::AnalogChannel;
pub use clock::Clock;
pub use dht::{AirReading, AirSensor, Dht, DhtError, DhtModel};
pub use pins::SensorPins;
