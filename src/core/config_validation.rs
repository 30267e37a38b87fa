use crate::hardware::DhtModel;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    ZeroSensorInterval,
    WarmupNotShorterThanInterval { warmup_ms: u64, interval_ms: u64 },
    IntervalBelowSensorMinimum { interval_ms: u64, minimum_ms: u64 },
    ZeroLoopDelay,
    DegenerateHygroCalibration(i16),
    InvalidDividerRatio(f32),
    InvalidBatteryRange { min_mv: f32, max_mv: f32 },
    UnknownDhtType(String),
}

pub fn parse_dht_type(name: &str) -> Result<DhtModel, ValidationError> {
    DhtModel::from_name(name).ok_or_else(|| ValidationError::UnknownDhtType(name.to_string()))
}

pub fn validate_timing(
    interval_ms: u64,
    warmup_ms: u64,
    model: DhtModel,
) -> Result<(), ValidationError> {
    if interval_ms == 0 {
        return Err(ValidationError::ZeroSensorInterval);
    }
    if warmup_ms >= interval_ms {
        return Err(ValidationError::WarmupNotShorterThanInterval {
            warmup_ms,
            interval_ms,
        });
    }
    if interval_ms < model.min_interval_ms() {
        return Err(ValidationError::IntervalBelowSensorMinimum {
            interval_ms,
            minimum_ms: model.min_interval_ms(),
        });
    }
    Ok(())
}

pub fn validate_loop_delay(loop_delay_ms: u32) -> Result<(), ValidationError> {
    if loop_delay_ms == 0 {
        Err(ValidationError::ZeroLoopDelay)
    } else {
        Ok(())
    }
}

pub fn validate_hygro_calibration(dry_raw: i16, wet_raw: i16) -> Result<(), ValidationError> {
    if dry_raw == wet_raw {
        Err(ValidationError::DegenerateHygroCalibration(dry_raw))
    } else {
        Ok(())
    }
}

pub fn validate_divider_ratio(ratio: f32) -> Result<(), ValidationError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidDividerRatio(ratio))
    }
}

pub fn validate_battery_range(min_mv: f32, max_mv: f32) -> Result<(), ValidationError> {
    if min_mv >= 0.0 && min_mv < max_mv {
        Ok(())
    } else {
        Err(ValidationError::InvalidBatteryRange { min_mv, max_mv })
    }
}
