//! Wizard economy engine.
//!
//! This crate provides:
//! - Spells and magic items that act through capability traits
//! - Wizards that cast, use items, trade, steal and loot
//! - A realm that resolves actions between wizards deterministically
//!
//! # Quick Start
//!
//! ```
//! use arcana_core::{catalog, MagicLevel, Wizard};
//!
//! let diffindo = catalog::get_spell("Diffindo").unwrap().clone();
//! let mut harry = Wizard::builder("Harry", MagicLevel::Student)
//!     .spells([diffindo.clone()])
//!     .build()
//!     .unwrap();
//! let mut draco = Wizard::builder("Draco", MagicLevel::Student)
//!     .basic_hp(30)
//!     .build()
//!     .unwrap();
//!
//! assert!(harry.cast_spell(&diffindo, &mut draco));
//! assert_eq!(draco.hp(), 10);
//! ```

pub mod catalog;
pub mod chooser;
pub mod config;
pub mod error;
pub mod items;
pub mod level;
pub mod magic;
pub mod realm;
pub mod spells;
pub mod testing;
pub mod trade;
pub mod wizard;

// Primary public API
pub use chooser::{Chooser, RngChooser};
pub use config::RealmConfig;
pub use error::{MagicError, MagicResult};
pub use items::{ItemId, ItemKind, MagicItem, Tradeable};
pub use level::MagicLevel;
pub use magic::{percent_of, MagicEffectRealization, MagicSource, Stat, Target};
pub use realm::{Action, Realm};
pub use spells::{Spell, SpellEffect, SpellId};
pub use trade::{give, purchase, Trader};
pub use testing::ScriptedChooser;
pub use wizard::{Wizard, WizardBuilder, WizardId};
