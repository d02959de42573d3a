pub mod effect_engine;

pub use effect_engine::IEffectEngine;
