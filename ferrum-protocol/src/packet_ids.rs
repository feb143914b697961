//! Numeric packet identifiers. Every message kind has its own id.

/// Clientbound play state packets.
pub mod play {
    /// Chat line with a JSON text payload.
    pub const C_SYSTEM_CHAT: i32 = 0x02;
    /// World age and time of day.
    pub const C_SET_TIME: i32 = 0x03;
    /// Item held or worn by an entity.
    pub const C_SET_EQUIPMENT: i32 = 0x04;
    /// Health, food and saturation.
    pub const C_SET_HEALTH: i32 = 0x06;
    /// Spawns another player's entity.
    pub const C_ADD_PLAYER: i32 = 0x0C;
    /// Destroys entities on the client.
    pub const C_REMOVE_ENTITIES: i32 = 0x13;
    /// Single block change.
    pub const C_BLOCK_UPDATE: i32 = 0x23;
    /// Game state change, weather among others.
    pub const C_GAME_EVENT: i32 = 0x2B;
    /// Tab list add/remove.
    pub const C_PLAYER_INFO_UPDATE: i32 = 0x38;
}
