/// 時刻取得の抽象化
///
/// ポーリング間隔とウォームアップ時間の判定に使用します。
/// 実機では起動からの経過時間、テストでは任意に進められる仮想時計を渡します。
pub trait Clock {
    /// 単調増加する現在時刻（ミリ秒）
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
