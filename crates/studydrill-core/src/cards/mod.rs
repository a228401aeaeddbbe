//! # Drill Cards
//!
//! The engine selects and orders *items*; it never renders them. The
//! [`Categorized`] trait is the seam between the engine and the host's
//! item type: selection and interleaving are generic over anything that
//! can report an id and its category memberships.
//!
//! [`DrillCard`] is the reference implementation used by the bundled
//! in-memory pools and the test suites.

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORIZED SEAM
// ============================================================================

/// Category membership for a selectable item.
///
/// An item can belong to more than one category attribute at once (a
/// fine-grained topic and a coarse section, say); [`Categorized::in_category`]
/// answers slot-matching for any of them, while
/// [`Categorized::group_key`] names the single grouping used when
/// interleaving a finished sequence.
pub trait Categorized {
    /// Stable identifier for the item.
    fn item_id(&self) -> &str;

    /// The category this item is grouped under when interleaving.
    fn group_key(&self) -> &str;

    /// Whether the item belongs to the given category, under any of its
    /// category attributes.
    fn in_category(&self, category_id: &str) -> bool {
        self.group_key() == category_id
    }
}

// ============================================================================
// DRILL CARD
// ============================================================================

/// The two disjoint kinds of studyable items.
///
/// Concept cards and quiz cards are selected through independent
/// weight/slot/select passes and never mix within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Flashcard-style concept prompt.
    #[default]
    Concept,
    /// Multiple-choice style quiz question.
    Quiz,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Concept => "concept",
            CardKind::Quiz => "quiz",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A studyable item as the engine sees it: an id plus category handles.
///
/// `section` is the coarse grouping (used for interleaving), `topic` the
/// fine-grained one; a slot allocated to either matches the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillCard {
    /// Stable item identifier, caller-supplied.
    pub id: String,
    pub kind: CardKind,
    /// Fine-grained category (e.g. a question group like "T1A").
    pub topic: String,
    /// Coarse category (e.g. a subelement like "T1").
    pub section: String,
    /// Pool the card was loaded from (e.g. an exam level).
    pub level: String,
}

impl DrillCard {
    pub fn new(
        id: impl Into<String>,
        kind: CardKind,
        topic: impl Into<String>,
        section: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            topic: topic.into(),
            section: section.into(),
            level: level.into(),
        }
    }
}

impl Categorized for DrillCard {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn group_key(&self) -> &str {
        &self.section
    }

    fn in_category(&self, category_id: &str) -> bool {
        self.topic == category_id || self.section == category_id
    }
}
