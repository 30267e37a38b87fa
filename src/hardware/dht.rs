use std::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

/// DHT11 のスタート信号（LOW保持時間）
const DHT11_START_LOW_US: u32 = 18_000;
/// DHT21/DHT22 のスタート信号（LOW保持時間）
const DHT22_START_LOW_US: u32 = 1_100;
/// ライン解放後、センサー応答を待つまでの時間
const RELEASE_WAIT_US: u32 = 40;
/// 1パルスの最大待ち時間
const PULSE_TIMEOUT_US: u32 = 1_000;

const FRAME_BITS: usize = 40;

/// 温湿度センサーの種別（DHTTYPE）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhtModel {
    Dht11,
    /// AM2301
    Dht21,
    /// AM2302
    Dht22,
}

impl DhtModel {
    /// 名称から種別を判定（大文字小文字は区別しない）
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "DHT11" => Some(Self::Dht11),
            "DHT21" | "AM2301" => Some(Self::Dht21),
            "DHT22" | "AM2302" => Some(Self::Dht22),
            _ => None,
        }
    }

    /// スタート信号としてラインをLOWに保持する時間（µs）
    pub fn start_low_us(self) -> u32 {
        match self {
            Self::Dht11 => DHT11_START_LOW_US,
            Self::Dht21 | Self::Dht22 => DHT22_START_LOW_US,
        }
    }

    /// データシート上の最小サンプリング間隔（ms）
    pub fn min_interval_ms(self) -> u64 {
        match self {
            Self::Dht11 => 1_000,
            Self::Dht21 | Self::Dht22 => 2_000,
        }
    }
}

impl fmt::Display for DhtModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dht11 => write!(f, "DHT11"),
            Self::Dht21 => write!(f, "DHT21"),
            Self::Dht22 => write!(f, "DHT22"),
        }
    }
}

/// 温湿度センサーのエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DhtError {
    #[error("センサー応答タイムアウト")]
    Timeout,
    #[error("チェックサム不一致 (期待値: {expected:#04x}, 実際: {actual:#04x})")]
    Checksum { expected: u8, actual: u8 },
    #[error("データピンエラー: {0}")]
    Pin(String),
}

/// 温湿度測定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirReading {
    /// 気温（℃）
    pub temperature_celsius: f32,
    /// 相対湿度（%）
    pub humidity_percent: f32,
}

/// 温湿度センサーの抽象化
pub trait AirSensor {
    fn read(&mut self) -> Result<AirReading, DhtError>;
}

impl<T: AirSensor + ?Sized> AirSensor for &mut T {
    fn read(&mut self) -> Result<AirReading, DhtError> {
        (**self).read()
    }
}

/// 受信した5バイトのフレームを検証して温湿度に変換する
///
/// バイト4はバイト0〜3の合計の下位8ビットです。
pub fn decode_frame(model: DhtModel, frame: &[u8; 5]) -> Result<AirReading, DhtError> {
    let expected = frame[..4]
        .iter()
        .fold(0u8, |sum, byte| sum.wrapping_add(*byte));
    if expected != frame[4] {
        return Err(DhtError::Checksum {
            expected,
            actual: frame[4],
        });
    }

    let reading = match model {
        DhtModel::Dht11 => {
            let humidity = (frame[0] as f32 * 10.0 + frame[1] as f32) / 10.0;
            let magnitude = (frame[2] as f32 * 10.0 + (frame[3] & 0x0F) as f32) / 10.0;
            let temperature = if frame[3] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            AirReading {
                temperature_celsius: temperature,
                humidity_percent: humidity,
            }
        }
        DhtModel::Dht21 | DhtModel::Dht22 => {
            let humidity = u16::from_be_bytes([frame[0], frame[1]]) as f32 / 10.0;
            let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]) as f32 / 10.0;
            let temperature = if frame[2] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            AirReading {
                temperature_celsius: temperature,
                humidity_percent: humidity,
            }
        }
    };

    Ok(reading)
}

/// ビットバンギングによるDHT系センサードライバ
///
/// データピンはオープンドレイン（外部プルアップ）で、
/// 出力と入力の両方として使用できる必要があります。
pub struct Dht<P, D> {
    pin: P,
    delay: D,
    model: DhtModel,
}

impl<P, D> Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D, model: DhtModel) -> Self {
        Self { pin, delay, model }
    }

    pub fn model(&self) -> DhtModel {
        self.model
    }

    /// ピンと遅延を返却する
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// 40ビットのフレームを受信する
    fn read_frame(&mut self) -> Result<[u8; 5], DhtError> {
        // スタート信号
        self.pin.set_low().map_err(pin_error)?;
        self.delay.delay_us(self.model.start_low_us());
        self.pin.set_high().map_err(pin_error)?;
        self.delay.delay_us(RELEASE_WAIT_US);

        // センサー応答 (LOW 80µs -> HIGH 80µs)
        self.measure_pulse(false)?;
        self.measure_pulse(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..FRAME_BITS {
            let low = self.measure_pulse(false)?;
            let high = self.measure_pulse(true)?;
            if high > low {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        Ok(frame)
    }

    /// ラインが `level` である時間をµs単位で数える
    fn measure_pulse(&mut self, level: bool) -> Result<u32, DhtError> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(pin_error)? == level {
            if elapsed >= PULSE_TIMEOUT_US {
                return Err(DhtError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

impl<P, D> AirSensor for Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read(&mut self) -> Result<AirReading, DhtError> {
        let frame = self.read_frame();

        // 結果に関わらずラインを解放しておく
        self.pin.set_high().map_err(pin_error)?;

        let frame = frame?;
        debug!("{} フレーム受信: {:02x?}", self.model, frame);
        decode_frame(self.model, &frame)
    }
}

fn pin_error<E: fmt::Debug>(error: E) -> DhtError {
    DhtError::Pin(format!("{:?}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::cell::Cell;
    use std::rc::Rc;

    /// 仮想時間で動くDHTのデータライン
    ///
    /// ホストがラインを解放した時刻を起点に `waveform` を再生し、
    /// 末尾以降はプルアップによりHIGHになります。
    struct SimLine {
        now_ns: Rc<Cell<u64>>,
        driven_low: bool,
        released_at_ns: u64,
        waveform: Vec<(bool, u32)>,
        low_durations_us: Vec<u64>,
    }

    impl SimLine {
        fn new(now_ns: Rc<Cell<u64>>, waveform: Vec<(bool, u32)>) -> Self {
            Self {
                now_ns,
                driven_low: false,
                released_at_ns: 0,
                waveform,
                low_durations_us: Vec::new(),
            }
        }

        fn level(&self) -> bool {
            if self.driven_low {
                return false;
            }
            let mut t_us = (self.now_ns.get() - self.released_at_ns) / 1_000;
            for &(level, duration_us) in &self.waveform {
                if t_us < duration_us as u64 {
                    return level;
                }
                t_us -= duration_us as u64;
            }
            true
        }
    }

    impl embedded_hal::digital::ErrorType for SimLine {
        type Error = Infallible;
    }

    impl OutputPin for SimLine {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.driven_low = true;
            self.released_at_ns = self.now_ns.get();
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.driven_low {
                let held_us = (self.now_ns.get() - self.released_at_ns) / 1_000;
                self.low_durations_us.push(held_us);
            }
            self.driven_low = false;
            self.released_at_ns = self.now_ns.get();
            Ok(())
        }
    }

    impl InputPin for SimLine {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level())
        }
    }

    struct SimDelay {
        now_ns: Rc<Cell<u64>>,
    }

    impl DelayNs for SimDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.now_ns.set(self.now_ns.get() + ns as u64);
        }
    }

    /// センサーが送出する波形を生成
    fn waveform_for(frame: [u8; 5]) -> Vec<(bool, u32)> {
        let mut waveform = vec![(true, 40), (false, 80), (true, 80)];
        for bit in 0..FRAME_BITS {
            let one = frame[bit / 8] & (0x80 >> (bit % 8)) != 0;
            waveform.push((false, 50));
            waveform.push((true, if one { 70 } else { 27 }));
        }
        waveform.push((false, 50));
        waveform
    }

    fn sim_sensor(model: DhtModel, waveform: Vec<(bool, u32)>) -> Dht<SimLine, SimDelay> {
        let now_ns = Rc::new(Cell::new(0));
        let line = SimLine::new(Rc::clone(&now_ns), waveform);
        Dht::new(line, SimDelay { now_ns }, model)
    }

    fn with_checksum(bytes: [u8; 4]) -> [u8; 5] {
        let sum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        [bytes[0], bytes[1], bytes[2], bytes[3], sum]
    }

    #[test]
    fn test_model_from_name() {
        assert_eq!(DhtModel::from_name("DHT22"), Some(DhtModel::Dht22));
        assert_eq!(DhtModel::from_name("dht11"), Some(DhtModel::Dht11));
        assert_eq!(DhtModel::from_name(" AM2301 "), Some(DhtModel::Dht21));
        assert_eq!(DhtModel::from_name("AM2302"), Some(DhtModel::Dht22));
        assert_eq!(DhtModel::from_name("SHT31"), None);
        assert_eq!(DhtModel::from_name(""), None);
    }

    #[test]
    fn test_model_display() {
        assert_eq!(DhtModel::Dht22.to_string(), "DHT22");
        assert_eq!(DhtModel::Dht11.to_string(), "DHT11");
    }

    #[test]
    fn test_decode_dht22_positive() {
        // 65.2%, 35.1℃
        let frame = with_checksum([0x02, 0x8C, 0x01, 0x5F]);
        let reading = decode_frame(DhtModel::Dht22, &frame).unwrap();
        assert_eq!(reading.humidity_percent, 65.2);
        assert_eq!(reading.temperature_celsius, 35.1);
    }

    #[test]
    fn test_decode_dht22_negative_temperature() {
        // -10.1℃
        let frame = [0x02, 0x8C, 0x80, 0x65, 0x73];
        let reading = decode_frame(DhtModel::Dht22, &frame).unwrap();
        assert_eq!(reading.temperature_celsius, -10.1);
        assert_eq!(reading.humidity_percent, 65.2);
    }

    #[test]
    fn test_decode_dht11() {
        let frame = with_checksum([55, 0, 24, 3]);
        let reading = decode_frame(DhtModel::Dht11, &frame).unwrap();
        assert_eq!(reading.humidity_percent, 55.0);
        assert_eq!(reading.temperature_celsius, 24.3);
    }

    #[test]
    fn test_decode_dht11_negative_temperature() {
        let frame = with_checksum([40, 0, 2, 0x85]);
        let reading = decode_frame(DhtModel::Dht11, &frame).unwrap();
        assert_eq!(reading.temperature_celsius, -2.5);
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let frame = [0x02, 0x8C, 0x01, 0x5F, 0x00];
        let result = decode_frame(DhtModel::Dht22, &frame);
        assert_eq!(
            result,
            Err(DhtError::Checksum {
                expected: 0xEE,
                actual: 0x00
            })
        );
    }

    #[test]
    fn test_checksum_wraps() {
        let frame = with_checksum([0xFF, 0xFF, 0x00, 0x02]);
        assert_eq!(frame[4], 0x00);
        assert!(decode_frame(DhtModel::Dht22, &frame).is_ok());
    }

    #[test]
    fn test_read_simulated_dht22() {
        let frame = with_checksum([0x02, 0x8C, 0x01, 0x5F]);
        let mut sensor = sim_sensor(DhtModel::Dht22, waveform_for(frame));

        let reading = sensor.read().unwrap();
        assert_eq!(reading.humidity_percent, 65.2);
        assert_eq!(reading.temperature_celsius, 35.1);

        let (line, _) = sensor.release();
        assert_eq!(line.low_durations_us, vec![1_100]);
        assert!(!line.driven_low);
    }

    #[test]
    fn test_read_simulated_dht11_uses_long_start_signal() {
        let frame = with_checksum([55, 0, 24, 3]);
        let mut sensor = sim_sensor(DhtModel::Dht11, waveform_for(frame));

        let reading = sensor.read().unwrap();
        assert_eq!(reading.temperature_celsius, 24.3);

        let (line, _) = sensor.release();
        assert_eq!(line.low_durations_us, vec![18_000]);
    }

    #[test]
    fn test_read_disconnected_sensor_times_out() {
        // 応答なし: プルアップでHIGHのまま
        let mut sensor = sim_sensor(DhtModel::Dht22, Vec::new());
        assert_eq!(sensor.read(), Err(DhtError::Timeout));

        let (line, _) = sensor.release();
        assert!(!line.driven_low);
    }

    #[test]
    fn test_read_stuck_low_line_times_out() {
        let mut sensor = sim_sensor(DhtModel::Dht22, vec![(true, 40), (false, 10_000)]);
        assert_eq!(sensor.read(), Err(DhtError::Timeout));
    }

    #[test]
    fn test_read_corrupted_frame_reports_checksum() {
        let mut frame = with_checksum([0x02, 0x8C, 0x01, 0x5F]);
        frame[4] ^= 0x01;
        let mut sensor = sim_sensor(DhtModel::Dht22, waveform_for(frame));
        assert!(matches!(sensor.read(), Err(DhtError::Checksum { .. })));
    }
}
