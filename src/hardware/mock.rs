use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::analog::AnalogChannel;
use super::clock::Clock;
use super::dht::{AirReading, AirSensor, DhtError};

/// テスト用の仮想時計
///
/// `advance` で任意に時間を進められます。クローンは同じ時刻を共有します。
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_ms: Arc<Mutex<u64>>,
}

impl MockClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// テスト用: 時刻を進める
    pub fn advance(&self, ms: u64) {
        *self.now_ms.lock().unwrap() += ms;
    }

    /// テスト用: 時刻を設定する
    pub fn set(&self, ms: u64) {
        *self.now_ms.lock().unwrap() = ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        *self.now_ms.lock().unwrap()
    }
}

/// テスト用の電源制御ピン
///
/// 出力レベルの履歴を記録します。
#[derive(Debug, Clone, Default)]
pub struct MockPowerPin {
    pub states: Arc<Mutex<Vec<bool>>>,
    pub simulate_error: Arc<Mutex<bool>>,
}

/// ピン操作の失敗を表すモックエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl MockPowerPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: 現在の出力レベル（未操作ならNone）
    pub fn is_on(&self) -> Option<bool> {
        self.states.lock().unwrap().last().copied()
    }

    /// テスト用: 出力レベルの履歴を取得
    pub fn get_states(&self) -> Vec<bool> {
        self.states.lock().unwrap().clone()
    }

    /// テスト用: ピン操作エラーをシミュレート
    pub fn set_error(&self, enable: bool) {
        *self.simulate_error.lock().unwrap() = enable;
    }

    fn record(&self, state: bool) -> Result<(), MockPinError> {
        if *self.simulate_error.lock().unwrap() {
            return Err(MockPinError);
        }
        self.states.lock().unwrap().push(state);
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPowerPin {
    type Error = MockPinError;
}

impl embedded_hal::digital::OutputPin for MockPowerPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

/// テスト用のADCチャンネル
///
/// キューに値があれば先頭から返し、空になった後は `fallback` を返し続けます。
#[derive(Debug, Clone, Default)]
pub struct MockAnalog {
    pub queue: Arc<Mutex<VecDeque<u16>>>,
    pub fallback: Arc<Mutex<u16>>,
    pub simulate_error: Arc<Mutex<bool>>,
    pub read_count: Arc<Mutex<usize>>,
}

/// ADC読み取り失敗を表すモックエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAnalogError;

impl MockAnalog {
    /// 常に `value` を返すチャンネルを作成
    pub fn constant(value: u16) -> Self {
        let mock = Self::default();
        *mock.fallback.lock().unwrap() = value;
        mock
    }

    /// テスト用: 読み取り値をキューに追加
    pub fn queue_value(&self, value: u16) {
        self.queue.lock().unwrap().push_back(value);
    }

    /// テスト用: 読み取りエラーをシミュレート
    pub fn set_error(&self, enable: bool) {
        *self.simulate_error.lock().unwrap() = enable;
    }

    /// テスト用: 読み取り回数を取得
    pub fn get_read_count(&self) -> usize {
        *self.read_count.lock().unwrap()
    }
}

impl AnalogChannel for MockAnalog {
    type Error = MockAnalogError;

    fn read(&mut self) -> Result<u16, Self::Error> {
        *self.read_count.lock().unwrap() += 1;
        if *self.simulate_error.lock().unwrap() {
            return Err(MockAnalogError);
        }
        let queued = self.queue.lock().unwrap().pop_front();
        Ok(queued.unwrap_or(*self.fallback.lock().unwrap()))
    }
}

/// テスト用の温湿度センサー
#[derive(Debug, Clone)]
pub struct MockAirSensor {
    pub response: Arc<Mutex<Result<AirReading, DhtError>>>,
    pub read_count: Arc<Mutex<usize>>,
}

impl MockAirSensor {
    pub fn new(temperature_celsius: f32, humidity_percent: f32) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(AirReading {
                temperature_celsius,
                humidity_percent,
            }))),
            read_count: Arc::new(Mutex::new(0)),
        }
    }

    /// テスト用: 次回以降の応答を設定
    pub fn set_response(&self, response: Result<AirReading, DhtError>) {
        *self.response.lock().unwrap() = response;
    }

    /// テスト用: 読み取り回数を取得
    pub fn get_read_count(&self) -> usize {
        *self.read_count.lock().unwrap()
    }
}

impl AirSensor for MockAirSensor {
    fn read(&mut self) -> Result<AirReading, DhtError> {
        *self.read_count.lock().unwrap() += 1;
        self.response.lock().unwrap().clone()
    }
}
