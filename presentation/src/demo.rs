//! Canned JavaScript → Haskell translation for `polyglot demo`
//!
//! The reply is a fixed string in the current response protocol, run through
//! the same parser and formatter as a live translation.

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use polyglot_domain::{ParseFailure, ParsedTranslation, ResponseParser};

pub const DEMO_SOURCE_LANGUAGE: &str = "JavaScript";
pub const DEMO_TARGET_LANGUAGE: &str = "Haskell";

pub const DEMO_SOURCE_CODE: &str = r#"class UserRepository {
  constructor(db) {
    this.db = db;
    this.cache = new Map();
  }

  async getUser(id) {
    if (this.cache.has(id)) return this.cache.get(id);
    const user = await this.db.query('SELECT * FROM users WHERE id = ?', [id]);
    this.cache.set(id, user);
    return user;
  }
}"#;

const DEMO_REPLY: &str = r#"✨ TRANSLATED CODE (Haskell):

```haskell
type UserRepo a = ReaderT Database (StateT Cache IO) a

getUser :: UserId -> UserRepo User
getUser uid = do
  cached <- gets (Map.lookup uid)
  case cached of
    Just user -> return user
    Nothing -> do
      db <- ask
      user <- liftIO $ queryDB db "SELECT * FROM users WHERE id = ?" [uid]
      modify (Map.insert uid user)
      return user
```

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

🧠 SYNTHESIS POINTS:

✓ State: Mutable state → State monad
Rationale: The cache stops being a hidden field and becomes state threaded through every call.

✓ Effects: Untracked effects → IO monad
Rationale: Database access is visible in the type, so pure code cannot perform it by accident.

✓ Dependencies: Constructor DI → Reader monad
Rationale: The database handle is read from the environment instead of stored on an instance.

✓ Control flow: Imperative flow → Monadic composition
Rationale: Early return becomes a case split, and sequencing is expressed with do-notation.

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

💡 KEY INSIGHT:

The class bundles state, effects and dependencies into one object. Haskell
separates them into a monad transformer stack, one layer per concern, so each
invariant is preserved by a type instead of by convention.

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

⚖️ TRADE-OFFS:

GAINED: Every effect and dependency is explicit in the signature.
LOST: The single familiar object; callers must run the transformer stack.
MITIGATION: Expose a small runUserRepo helper that hides the stack at the edges.

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
"#;

/// The canned translation, parsed
pub fn demo_translation() -> Result<ParsedTranslation, ParseFailure> {
    ResponseParser::new().parse(DEMO_REPLY)
}

/// Full demo output: the source snippet, then the formatted translation
pub fn render_demo() -> Result<String, ParseFailure> {
    let translation = demo_translation()?;
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n\n{}\n\n",
        format!("Source: {}", DEMO_SOURCE_LANGUAGE).cyan().bold(),
        DEMO_SOURCE_CODE
    ));
    output.push_str(&ConsoleFormatter::format(
        &translation,
        DEMO_TARGET_LANGUAGE,
    ));

    Ok(output)
}
