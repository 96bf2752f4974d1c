// Interface adapters: concrete transports, preference stores and login prompts.

pub mod browser;
pub mod clients;
pub mod listener;
pub mod preferences;
