pub mod model;
pub mod provider;

pub use model::{
    Config, DIR_PLACEHOLDER, KpsewhichBibtexConfig, KpsewhichConfig, LatexConfig, Recipe,
    RecipeConfig, RootFileConfig, Tool,
};
pub use provider::{ConfigProvider, FileConfig, SharedConfig};
