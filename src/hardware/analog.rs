use std::fmt::Debug;

/// ADCチャンネルの抽象化
///
/// 土壌湿度センサーでは生のADCコード、電圧ラインでは
/// キャリブレーション済みのピン電圧（mV）を返す実装を使います。
pub trait AnalogChannel {
    type Error: Debug;

    /// 1回分の変換結果を読み取る
    fn read(&mut self) -> Result<u16, Self::Error>;
}

impl<T: AnalogChannel + ?Sized> AnalogChannel for &mut T {
    type Error = T::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        (**self).read()
    }
}
