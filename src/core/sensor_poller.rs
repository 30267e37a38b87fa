use std::fmt::Debug;

use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::core::config::SensorConfig;
use crate::core::poll_timer::PollTimer;
use crate::core::sensor_reading::{HygroReading, SensorReading, VoltageReading};
use crate::hardware::{AirReading, AirSensor, AnalogChannel, Clock, DhtError, SensorPins};
use crate::utils::{battery_percentage, hyg_to_percentage, supply_millivolts};

/// DHT22の測定可能範囲（℃）
const AIR_TEMPERATURE_RANGE: (f32, f32) = (-40.0, 80.0);

/// センサー操作のエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("センサーが初期化されていません (setup_sensor 未実行)")]
    NotInitialized,
    #[error("土壌湿度センサーに通電されていません")]
    HygroNotPrimed,
    #[error("土壌湿度センサーのウォームアップ中です (残り{remaining_ms}ms)")]
    HygroWarmingUp { remaining_ms: u64 },
    #[error("電源制御ピンエラー: {0}")]
    PowerPin(String),
    #[error("ADC読み取りエラー: {0}")]
    Analog(String),
    #[error("温湿度センサーエラー: {0}")]
    Air(#[from] DhtError),
}

/// センサーポーラー
///
/// 土壌湿度センサー・温湿度センサー・電圧ラインを周期的に読み取ります。
/// `read_sensor` をメインループから繰り返し呼び出す協調型の設計で、
/// 土壌湿度センサーのウォームアップ中もループをブロックしません。
pub struct SensorPoller<C, P, H, A, V> {
    config: SensorConfig,
    clock: C,
    pins: SensorPins<P, H, A, V>,
    timer: PollTimer,
    initialized: bool,
    latest: Option<SensorReading>,
}

impl<C, P, H, A, V> SensorPoller<C, P, H, A, V>
where
    C: Clock,
    P: OutputPin,
    H: AnalogChannel,
    A: AirSensor,
    V: AnalogChannel,
{
    pub fn new(config: SensorConfig, clock: C, pins: SensorPins<P, H, A, V>) -> Self {
        Self {
            config,
            clock,
            pins,
            timer: PollTimer::new(),
            initialized: false,
            latest: None,
        }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn timer(&self) -> &PollTimer {
        &self.timer
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 最後に完了した計測サイクルの結果
    pub fn latest(&self) -> Option<&SensorReading> {
        self.latest.as_ref()
    }

    /// 最後に完了した計測サイクルの結果を取り出す
    pub fn take_latest(&mut self) -> Option<SensorReading> {
        self.latest.take()
    }

    /// ピンを返却する
    pub fn release(self) -> SensorPins<P, H, A, V> {
        self.pins
    }

    /// センサーを初期化
    ///
    /// 土壌湿度センサーの電源を切り、タイミング状態をリセットします。
    pub fn setup_sensor(&mut self) -> Result<(), SensorError> {
        info!(
            "センサーを初期化中... (種別: {}, 間隔: {}ms, ウォームアップ: {}ms)",
            self.config.dht_model, self.config.sensor_interval_ms, self.config.hygro_warmup_ms
        );

        self.pins.hygro_power.set_low().map_err(power_pin_error)?;
        self.timer.reset();
        self.latest = None;
        self.initialized = true;

        info!("✓ センサーの初期化に成功");
        Ok(())
    }

    /// 土壌湿度センサーの電源を切り替える
    ///
    /// `true` で通電してウォームアップを開始します（通電中なら開始時刻を維持）。
    /// `false` で電源を切り、ウォームアップ状態を破棄します。
    pub fn prime_hygro(&mut self, state: bool) -> Result<(), SensorError> {
        self.ensure_initialized()?;

        if state {
            self.pins.hygro_power.set_high().map_err(power_pin_error)?;
            if !self.timer.is_primed() {
                debug!(
                    "土壌湿度センサーに通電しました (ウォームアップ: {}ms)",
                    self.config.hygro_warmup_ms
                );
            }
            self.timer.prime(self.clock.now_ms());
        } else {
            self.pins.hygro_power.set_low().map_err(power_pin_error)?;
            if self.timer.is_primed() {
                debug!("土壌湿度センサーの電源をオフにしました");
            }
            self.timer.unprime();
        }

        Ok(())
    }

    /// 土壌湿度センサーの生値をパーセンテージに変換
    pub fn hyg_to_percentage(&self, raw: i16) -> f32 {
        hyg_to_percentage(raw, self.config.hygro_dry_raw, self.config.hygro_wet_raw)
    }

    /// 土壌湿度を測定
    ///
    /// 通電していない場合、またはウォームアップが終わっていない場合はエラーを返します。
    pub fn read_hygro(&mut self) -> Result<HygroReading, SensorError> {
        self.ensure_initialized()?;

        let now = self.clock.now_ms();
        match self.timer.warmup_remaining(now, self.config.hygro_warmup_ms) {
            None => return Err(SensorError::HygroNotPrimed),
            Some(0) => {}
            Some(remaining_ms) => return Err(SensorError::HygroWarmingUp { remaining_ms }),
        }

        let code = self.pins.hygro_adc.read().map_err(analog_error)?;
        let raw = i16::try_from(code).unwrap_or(i16::MAX);
        let percent = self.hyg_to_percentage(raw);

        debug!("🌱 土壌湿度測定: {:.1}% (生値: {})", percent, raw);
        Ok(HygroReading { raw, percent })
    }

    /// 温度と湿度を測定
    pub fn read_temp_hum(&mut self) -> Result<AirReading, SensorError> {
        self.ensure_initialized()?;

        let reading = self.pins.air.read()?;
        debug!(
            "🌡️ 温湿度測定: {:.1}°C, {:.1}%",
            reading.temperature_celsius, reading.humidity_percent
        );
        Ok(reading)
    }

    /// 電圧を測定
    pub fn read_voltage(&mut self) -> Result<VoltageReading, SensorError> {
        self.ensure_initialized()?;

        let adc_mv = self.pins.voltage_adc.read().map_err(analog_error)?;
        let supply_mv = supply_millivolts(adc_mv, self.config.voltage_divider_ratio);
        let volts = supply_mv / 1000.0;
        let percent = battery_percentage(
            supply_mv,
            self.config.battery_min_mv,
            self.config.battery_max_mv,
        );

        debug!("🔋 電圧測定: {:.2}V ({}%, ADC: {}mV)", volts, percent, adc_mv);
        Ok(VoltageReading { volts, percent })
    }

    /// 計測サイクルを1ステップ進める
    ///
    /// # 戻り値
    /// - `Ok(true)`: 新しい計測サイクルが完了し、`latest()` で取得可能
    /// - `Ok(false)`: 計測間隔が未経過、またはウォームアップ中
    /// - `Err`: 電源制御ピンの操作に失敗
    ///
    /// 個々のセンサーの読み取り失敗はサイクルを止めず、
    /// 該当項目を `None` にして警告として記録します。
    pub fn read_sensor(&mut self) -> Result<bool, SensorError> {
        self.ensure_initialized()?;

        let now = self.clock.now_ms();
        if !self.timer.is_due(now, self.config.sensor_interval_ms) {
            return Ok(false);
        }

        if !self.timer.is_primed() {
            info!("計測サイクルを開始します");
            self.prime_hygro(true)?;
        }

        if !self.timer.is_warm(now, self.config.hygro_warmup_ms) {
            return Ok(false);
        }

        let reading = self.collect_reading(now);
        let power_off = self.prime_hygro(false);

        info!("計測完了: {}", reading.get_summary());
        self.timer.mark_read(now);
        self.latest = Some(reading);

        power_off?;
        Ok(true)
    }

    fn collect_reading(&mut self, now: u64) -> SensorReading {
        let mut warnings = Vec::new();

        let hygro = match self.read_hygro() {
            Ok(hygro) => Some(hygro),
            Err(e) => {
                warn!("土壌湿度センサー読み取りエラー: {}", e);
                warnings.push(format!("土壌湿度: {}", e));
                None
            }
        };

        let air = match self.read_temp_hum() {
            Ok(air) => {
                if let Some(message) = validate_air(&air) {
                    warn!("温湿度測定警告: {}", message);
                    warnings.push(message);
                }
                Some(air)
            }
            Err(e) => {
                warn!("温湿度センサー読み取りエラー: {}", e);
                warnings.push(format!("温湿度: {}", e));
                None
            }
        };

        let voltage = match self.read_voltage() {
            Ok(voltage) => Some(voltage),
            Err(e) => {
                warn!("電圧読み取りエラー: {}", e);
                warnings.push(format!("電圧: {}", e));
                None
            }
        };

        let mut reading = SensorReading::new(now)
            .with_hygro(hygro)
            .with_air(
                air.map(|a| a.temperature_celsius),
                air.map(|a| a.humidity_percent),
            )
            .with_voltage(voltage);
        for warning in warnings {
            reading.add_warning(warning);
        }
        reading
    }

    fn ensure_initialized(&self) -> Result<(), SensorError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SensorError::NotInitialized)
        }
    }
}

/// 温湿度の妥当性を検証
fn validate_air(reading: &AirReading) -> Option<String> {
    let (min, max) = AIR_TEMPERATURE_RANGE;
    if reading.temperature_celsius < min || reading.temperature_celsius > max {
        return Some(format!(
            "温度が仕様範囲外です: {:.1}°C",
            reading.temperature_celsius
        ));
    }

    if !(0.0..=100.0).contains(&reading.humidity_percent) {
        return Some(format!(
            "湿度が仕様範囲外です: {:.1}%",
            reading.humidity_percent
        ));
    }

    None
}

fn power_pin_error<E: Debug>(error: E) -> SensorError {
    SensorError::PowerPin(format!("{:?}", error))
}

fn analog_error<E: Debug>(error: E) -> SensorError {
    SensorError::Analog(format!("{:?}", error))
}
