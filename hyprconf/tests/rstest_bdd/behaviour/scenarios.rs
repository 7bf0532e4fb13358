//! Binds the `hyprconf` feature files to the step registry.

use crate::fixtures::{ConfigContext, config_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/parsing.feature",
    fixtures = [config_context: ConfigContext]
);
scenarios!(
    "tests/features/special_categories.feature",
    fixtures = [config_context: ConfigContext]
);
