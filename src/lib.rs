//! plainpy translates plain English into runnable Python 3 with feedback
//! aimed at beginners: phrase-to-code provenance mappings, alternative
//! renderings, a confidence level and the curriculum concepts exercised.
//!
//! The pipeline is deterministic and total. Input text is normalized
//! (English operator phrases folded to symbols), parsed by an ordered rule
//! battery with a Pratt expression parser underneath, and rendered by the
//! Python backend. A line no rule understands prints itself, so
//! [`translate`] always returns a usable [`Translation`].
//!
//! ```
//! let result = plainpy::translate("loop 5 times and print Hello");
//! assert_eq!(result.generated_code, "for i in range(5):\n    print(\"Hello\")");
//! ```

pub mod backend;
pub mod engine;
pub mod feedback;
pub mod frontend;
pub mod utils;

pub use engine::translate;
pub use feedback::{Alternative, ConceptTag, Confidence, Mapping, Translation};
