/// ポーリングのタイミング状態
///
/// 最後に計測サイクルを完了した時刻と、土壌湿度センサーへ通電した時刻を保持します。
/// 時刻はすべて `Clock::now_ms` の値で、逆行しても減算がアンダーフローしないよう
/// 飽和演算を使います。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollTimer {
    last_read_ms: Option<u64>,
    primed_at_ms: Option<u64>,
}

impl PollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の計測サイクルを開始してよいか（初回は常に true）
    pub fn is_due(&self, now_ms: u64, interval_ms: u64) -> bool {
        match self.last_read_ms {
            Some(last) => now_ms.saturating_sub(last) >= interval_ms,
            None => true,
        }
    }

    /// 通電開始を記録（既に通電中なら開始時刻を維持）
    pub fn prime(&mut self, now_ms: u64) {
        if self.primed_at_ms.is_none() {
            self.primed_at_ms = Some(now_ms);
        }
    }

    /// 通電停止を記録
    pub fn unprime(&mut self) {
        self.primed_at_ms = None;
    }

    pub fn is_primed(&self) -> bool {
        self.primed_at_ms.is_some()
    }

    pub fn primed_at_ms(&self) -> Option<u64> {
        self.primed_at_ms
    }

    pub fn last_read_ms(&self) -> Option<u64> {
        self.last_read_ms
    }

    /// ウォームアップが完了しているか（未通電なら false）
    pub fn is_warm(&self, now_ms: u64, warmup_ms: u64) -> bool {
        self.warmup_remaining(now_ms, warmup_ms) == Some(0)
    }

    /// ウォームアップ完了までの残り時間（未通電なら None）
    pub fn warmup_remaining(&self, now_ms: u64, warmup_ms: u64) -> Option<u64> {
        self.primed_at_ms
            .map(|primed_at| warmup_ms.saturating_sub(now_ms.saturating_sub(primed_at)))
    }

    /// 計測サイクルの完了を記録
    pub fn mark_read(&mut self, now_ms: u64) {
        self.last_read_ms = Some(now_ms);
    }

    /// 初期状態に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
