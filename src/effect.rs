//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Ask the gateway for `query`; the result is tagged with `generation`
    LookupEntry { query: String, generation: u64 },
    /// Fire one sprite animation tick after the toggle interval
    ScheduleSpriteTick { generation: u64 },
    /// Cancel the pending sprite animation tick
    StopSpriteAnimation,
    LoadSprite { url: String },
    PlayCry { id: u32 },
}
