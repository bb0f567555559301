mod tokens;

pub use tokens::FileTokenStore;
