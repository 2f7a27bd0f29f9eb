use std::{fmt::Display, sync::LazyLock};

const SKIP_STRING_CHECKS_ENV_VAR: &str = "DATASET_SKIP_STRING_ERROR_CHECKS";

static SKIP_STRING_CHECKS: LazyLock<bool> =
    LazyLock::new(|| std::env::var(SKIP_STRING_CHECKS_ENV_VAR).is_ok());

pub trait ResultAssertsExt {
    fn assert_err_contains(&self, to_contain: impl AsRef<str>);
}

impl<T, E> ResultAssertsExt for Result<T, E>
where
    E: Display,
{
    #[track_caller]
    fn assert_err_contains(&self, to_contain: impl AsRef<str>) {
        let to_contain = to_contain.as_ref();
        let Err(e) = self else {
            panic!("expected an error containing `{to_contain}`, got Ok");
        };

        if *SKIP_STRING_CHECKS {
            eprintln!(
                "WARNING: not checking error strings because `{SKIP_STRING_CHECKS_ENV_VAR}` is set"
            );
            return;
        }

        let error_string = e.to_string();
        assert!(
            error_string.contains(to_contain),
            "error string `{error_string}` doesn't contain `{to_contain}`"
        );
    }
}
