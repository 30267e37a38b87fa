use esp_idf_svc::hal::{
    adc::{
        attenuation::DB_12,
        oneshot::{
            config::{AdcChannelConfig, Calibration},
            AdcChannelDriver, AdcDriver,
        },
    },
    delay::{Ets, FreeRtos},
    gpio::{PinDriver, Pull},
    peripherals::Peripherals,
};
use log::{error, info, warn};

use watergate_sensor::hardware::esp::{EspAdcMillivolts, EspAdcRaw, EspClock};
use watergate_sensor::{Dht, SensorConfig, SensorPins, SensorPoller};

/// アプリケーションのメインエントリーポイント
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("watergate-sensor v{}", watergate_sensor::VERSION);

    // 設定ファイル読み込み
    let config = SensorConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;
    let loop_delay_ms = config.loop_delay_ms;

    info!("ペリフェラルを初期化しています");
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // 土壌湿度センサーの電源制御 (GPIO5)
    let hygro_power = PinDriver::output(pins.gpio5)?;

    // 温湿度センサーのデータライン (GPIO6, オープンドレイン)
    let mut dht_pin = PinDriver::input_output_od(pins.gpio6)?;
    dht_pin.set_pull(Pull::Up)?;
    dht_pin.set_high()?;
    let dht = Dht::new(dht_pin, Ets, config.dht_model);

    // ADC1: 土壌湿度 (GPIO1) と電圧 (GPIO4)
    let adc_driver = AdcDriver::new(peripherals.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: DB_12,
        calibration: Calibration::Line,
        ..Default::default()
    };
    let hygro_adc = EspAdcRaw::new(AdcChannelDriver::new(&adc_driver, pins.gpio1, &adc_config)?);
    let voltage_adc =
        EspAdcMillivolts::new(AdcChannelDriver::new(&adc_driver, pins.gpio4, &adc_config)?);

    let sensor_pins = SensorPins::new(hygro_power, hygro_adc, dht, voltage_adc);
    let mut poller = SensorPoller::new(config, EspClock, sensor_pins);
    poller.setup_sensor()?;

    info!("=== センサーループを開始します ===");

    loop {
        match poller.read_sensor() {
            Ok(true) => {
                if let Some(reading) = poller.take_latest() {
                    if reading.is_reliable() {
                        info!("📊 {}", reading.get_summary());
                    } else {
                        warn!("📊 {}", reading.get_summary());
                        for warning in &reading.sensor_warnings {
                            warn!("  - {}", warning);
                        }
                    }
                }
            }
            Ok(false) => {}
            Err(e) => error!("計測サイクルでエラーが発生しました: {}", e),
        }

        FreeRtos::delay_ms(loop_delay_ms);
    }
}
