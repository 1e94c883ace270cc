//! Short user-facing messages the host flashes after each board action

use std::time::Duration;

use crate::formation::FormationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    Loaded,
    NoSaveFound,
    LoadFailed,
    Reset,
    ArrowPrompt,
    ArrowStartRecorded,
    ArrowAdded,
    ArrowsRemoved,
    FormationApplied(FormationMode),
}

impl Notice {
    /// Suggested time before the host dismisses the message.
    pub const DISMISS_AFTER: Duration = Duration::from_millis(1400);

    pub fn message_fr(&self) -> String {
        match self {
            Self::Saved => "Configuration sauvegardée.".to_string(),
            Self::Loaded => "Configuration chargée.".to_string(),
            Self::NoSaveFound => "Aucune sauvegarde trouvée.".to_string(),
            Self::LoadFailed => "Sauvegarde illisible, rien n'a été modifié.".to_string(),
            Self::Reset => "Terrain réinitialisé au mode attaque.".to_string(),
            Self::ArrowPrompt => "Clique sur le terrain: départ puis arrivée de la flèche.".to_string(),
            Self::ArrowStartRecorded => "Départ enregistré, clique sur l'arrivée.".to_string(),
            Self::ArrowAdded => "Flèche ajoutée.".to_string(),
            Self::ArrowsRemoved => "Toutes les flèches ont été supprimées.".to_string(),
            Self::FormationApplied(mode) => format!("Mode {}.", mode.display_name_fr().to_lowercase()),
        }
    }

    pub fn message_en(&self) -> String {
        match self {
            Self::Saved => "Board saved.".to_string(),
            Self::Loaded => "Board loaded.".to_string(),
            Self::NoSaveFound => "No save found.".to_string(),
            Self::LoadFailed => "Saved board is unreadable; nothing was changed.".to_string(),
            Self::Reset => "Board reset to attack mode.".to_string(),
            Self::ArrowPrompt => "Click the field: arrow start, then arrow end.".to_string(),
            Self::ArrowStartRecorded => "Start recorded, click the end point.".to_string(),
            Self::ArrowAdded => "Arrow added.".to_string(),
            Self::ArrowsRemoved => "All arrows removed.".to_string(),
            Self::FormationApplied(mode) => format!("{} mode.", mode.display_name_en()),
        }
    }

    /// Whether the message reports a problem rather than a success.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::NoSaveFound | Self::LoadFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_messages() {
        assert_eq!(Notice::Saved.message_fr(), "Configuration sauvegardée.");
        assert_eq!(Notice::NoSaveFound.message_fr(), "Aucune sauvegarde trouvée.");
        assert_eq!(Notice::Reset.message_fr(), "Terrain réinitialisé au mode attaque.");
        assert_eq!(Notice::FormationApplied(FormationMode::Counter).message_fr(), "Mode contre-attaque.");
        assert_eq!(Notice::FormationApplied(FormationMode::Attack).message_en(), "Attack mode.");
    }

    #[test]
    fn test_error_notices() {
        assert!(Notice::LoadFailed.is_error());
        assert!(!Notice::ArrowAdded.is_error());
    }
}
