/// Round orchestration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoundConfig {
    /// Number of recent event selections excluded from the next natural draw.
    /// Zero disables the no-repeat rule.
    pub history_capacity: usize,

    /// Skills drawn per player when no event overrides the count.
    pub skills_per_player: usize,

    /// Upper bound an event may raise the per-player skill count to.
    pub max_skills_per_player: usize,

    /// Delay between round start and skill assignment, in host ticks.
    pub skill_assign_delay: u64,

    /// Per-player no-repeat window for skills. Zero disables it.
    pub skill_history_capacity: usize,

    /// Base seed for the weighted selector. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl RoundConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HISTORY_CAPACITY: usize = 3;
    pub const DEFAULT_SKILLS_PER_PLAYER: usize = 1;
    pub const DEFAULT_MAX_SKILLS_PER_PLAYER: usize = 3;
    /// One second at the CS2 server tick rate.
    pub const DEFAULT_SKILL_ASSIGN_DELAY: u64 = 64;

    pub fn new() -> Self {
        Self {
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            skills_per_player: Self::DEFAULT_SKILLS_PER_PLAYER,
            max_skills_per_player: Self::DEFAULT_MAX_SKILLS_PER_PLAYER,
            skill_assign_delay: Self::DEFAULT_SKILL_ASSIGN_DELAY,
            skill_history_capacity: 0,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Clamps a requested skill count into `1..=max_skills_per_player`.
    pub fn clamp_skill_count(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_skills_per_player.max(1))
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new()
    }
}
