/// ユーティリティモジュール
/// ハードウェア非依存の純粋関数を提供

pub mod hygro_calc;
pub mod voltage_calc;

// 便利な再エクスポート
pub use hygro_calc::hyg_to_percentage;
pub use voltage_calc::{battery_percentage, supply_millivolts};
