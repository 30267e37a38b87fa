/// 土壌湿度の測定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HygroReading {
    /// ADC生値
    pub raw: i16,
    /// 土壌湿度（%）
    pub percent: f32,
}

/// 電圧の測定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageReading {
    /// 分圧前の電圧（V）
    pub volts: f32,
    /// バッテリー残量の目安（0-100%）
    pub percent: u8,
}

/// 1回の計測サイクルで得られたデータ（ハードウェア非依存）
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub taken_at_ms: u64,
    pub hygro_raw: Option<i16>,
    pub hygro_percent: Option<f32>,
    pub temperature_celsius: Option<f32>,
    pub air_humidity_percent: Option<f32>,
    pub voltage_v: Option<f32>,
    pub voltage_percent: Option<u8>,
    pub sensor_warnings: Vec<String>,
}

impl SensorReading {
    /// 新しいSensorReadingインスタンスを作成
    pub fn new(taken_at_ms: u64) -> Self {
        Self {
            taken_at_ms,
            hygro_raw: None,
            hygro_percent: None,
            temperature_celsius: None,
            air_humidity_percent: None,
            voltage_v: None,
            voltage_percent: None,
            sensor_warnings: Vec::new(),
        }
    }

    /// 土壌湿度データを追加
    pub fn with_hygro(mut self, hygro: Option<HygroReading>) -> Self {
        self.hygro_raw = hygro.map(|h| h.raw);
        self.hygro_percent = hygro.map(|h| h.percent);
        self
    }

    /// 温湿度データを追加
    pub fn with_air(mut self, temperature: Option<f32>, humidity: Option<f32>) -> Self {
        self.temperature_celsius = temperature;
        self.air_humidity_percent = humidity;
        self
    }

    /// 電圧データを追加
    pub fn with_voltage(mut self, voltage: Option<VoltageReading>) -> Self {
        self.voltage_v = voltage.map(|v| v.volts);
        self.voltage_percent = voltage.map(|v| v.percent);
        self
    }

    /// 警告メッセージを追加
    pub fn add_warning(&mut self, warning: String) {
        self.sensor_warnings.push(warning);
    }

    /// 全センサーの値が揃い、警告がないか
    pub fn is_reliable(&self) -> bool {
        self.hygro_percent.is_some()
            && self.temperature_celsius.is_some()
            && self.air_humidity_percent.is_some()
            && self.voltage_v.is_some()
            && self.sensor_warnings.is_empty()
    }

    /// 測定データのサマリを取得
    pub fn get_summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(hygro) = self.hygro_percent {
            parts.push(format!("土壌湿度:{:.1}%", hygro));
        }

        if let Some(temp) = self.temperature_celsius {
            parts.push(format!("温度:{:.1}°C", temp));
        }

        if let Some(humidity) = self.air_humidity_percent {
            parts.push(format!("湿度:{:.1}%", humidity));
        }

        if let Some(voltage) = self.voltage_v {
            parts.push(format!("電圧:{:.2}V", voltage));
        }

        if let Some(percent) = self.voltage_percent {
            parts.push(format!("残量:{}%", percent));
        }

        if !self.sensor_warnings.is_empty() {
            parts.push(format!("警告:{}件", self.sensor_warnings.len()));
        }

        if parts.is_empty() {
            return "データなし".to_string();
        }

        parts.join(", ")
    }
}
