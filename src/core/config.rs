//! Session configuration with documented constants

/// Configuration for a dungeon-crawl session
///
/// Values mirror the classic 80x35 terminal layout: the map fills the top of
/// the screen and the message log occupies the rows below it.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Map width in cells
    pub map_width: u32,

    /// Map height in cells
    pub map_height: u32,

    /// Character budget for a single message-log line
    ///
    /// The pending message buffer is flushed to a new line before it would
    /// exceed this many characters.
    pub message_budget: usize,

    /// How many trailing log lines the render surface shows
    pub visible_log_lines: usize,

    /// Seed for the session's random source (combat rolls, AI shuffling)
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 60,
            map_height: 30,
            message_budget: 75,
            visible_log_lines: 5,
            seed: 42,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        // A map without an interior cannot hold the player
        if self.map_width < 3 || self.map_height < 3 {
            return Err(format!(
                "map must be at least 3x3, got {}x{}",
                self.map_width, self.map_height
            ));
        }

        if self.message_budget == 0 {
            return Err("message_budget must be positive".into());
        }

        if self.visible_log_lines == 0 {
            return Err("visible_log_lines must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_map_rejected() {
        let config = GameConfig {
            map_width: 2,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = GameConfig {
            message_budget: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
