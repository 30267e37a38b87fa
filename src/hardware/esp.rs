//! ESP-IDF 向けのハードウェア実装

use std::borrow::Borrow;

use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_svc::hal::gpio::ADCPin;
use esp_idf_svc::sys::EspError;
use esp_idf_svc::systime::EspSystemTime;

use super::analog::AnalogChannel;
use super::clock::Clock;

/// 起動からの経過時間を返す時計
pub struct EspClock;

impl Clock for EspClock {
    fn now_ms(&self) -> u64 {
        EspSystemTime.now().as_millis() as u64
    }
}

/// 生のADCコードを返すチャンネル（土壌湿度センサー用）
pub struct EspAdcRaw<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    channel: AdcChannelDriver<'d, T, M>,
}

impl<'d, T, M> EspAdcRaw<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    pub fn new(channel: AdcChannelDriver<'d, T, M>) -> Self {
        Self { channel }
    }
}

impl<'d, T, M> AnalogChannel for EspAdcRaw<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    type Error = EspError;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.channel.read_raw()
    }
}

/// キャリブレーション済みのピン電圧（mV）を返すチャンネル（電圧測定用）
pub struct EspAdcMillivolts<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    channel: AdcChannelDriver<'d, T, M>,
}

impl<'d, T, M> EspAdcMillivolts<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    pub fn new(channel: AdcChannelDriver<'d, T, M>) -> Self {
        Self { channel }
    }
}

impl<'d, T, M> AnalogChannel for EspAdcMillivolts<'d, T, M>
where
    T: ADCPin,
    M: Borrow<AdcDriver<'d, T::Adc>>,
{
    type Error = EspError;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.channel.read()
    }
}
