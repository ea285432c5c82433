/// Escalation policies incidents can be routed through.
///
/// Each variant resolves to a fixed PagerDuty escalation policy ID, see [`EscalationPolicy::id`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EscalationPolicy {
    #[default]
    Everyone,
    JustPersonA,
    JustPersonB,
}

impl EscalationPolicy {
    pub const ALL: [EscalationPolicy; 3] = [Self::Everyone, Self::JustPersonA, Self::JustPersonB];

    /// The provider-assigned ID of this policy
    pub fn id(self) -> &'static str {
        match self {
            Self::Everyone => "P7X2K9Q",
            Self::JustPersonA => "PQ4RL1M",
            Self::JustPersonB => "P0ZB6TD",
        }
    }
}
