#[cfg(test)]
use std::cell::RefCell;
#[cfg(not(test))]
use std::env;
use std::ops::Deref;

// region ArgName
/// Simple wrapper around a collection of strings.
/// Can be constructed automatically from &str & Vec<&str>.
/// Useful to handle args which can have several names, like `-p` and `--port`.
pub struct ArgName<'a> {
    names: Vec<&'a str>,
}
impl<'a> From<&'a str> for ArgName<'a> {
    fn from(val: &'a str) -> Self {
        ArgName { names: vec![val] }
    }
}

impl<'a> From<Vec<&'a str>> for ArgName<'a> {
    fn from(val: Vec<&'a str>) -> Self {
        ArgName { names: val }
    }
}

impl<'a> Deref for ArgName<'a> {
    type Target = Vec<&'a str>;

    fn deref(&self) -> &Self::Target {
        &self.names
    }
}
// endregion

/// Retrieve the value passed to the app as `<arg_name>=<value>`.
/// An empty value counts as missing.
///
/// /!\ As this works on global variables,
/// a function using `retrieve_arg_value` could be tricky to test.
/// To do so, wrap your test with `with_env_args(args, fn)`.
/// This function is only available in a test context.
pub fn retrieve_arg_value<'a, A>(arg_names: A) -> Option<String>
where
    A: Into<ArgName<'a>>,
{
    let arg_names = arg_names.into();
    get_env_args().into_iter().find_map(|arg| {
        arg_names.iter().find_map(|arg_name| {
            arg.strip_prefix(arg_name)
                .and_then(|rest| rest.strip_prefix('='))
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        })
    })
}

pub fn retrieve_arg_value_or_default<'a, A>(arg_names: A, default_value: &str) -> String
where
    A: Into<ArgName<'a>>,
{
    retrieve_arg_value(arg_names).unwrap_or_else(|| default_value.to_owned())
}

#[cfg(not(test))]
fn get_env_args() -> Vec<String> {
    env::args().collect()
}

#[cfg(test)]
thread_local! {
    /// A mutable `Vec<String>` to host env args for tests.
    /// When a test is run with `with_env_args`,
    /// the inner `Vec` is set to whatever param is passed.
    /// It is then reset to its previous state.
    static ENV_ARGS: RefCell<Vec<String>> = const { RefCell::new(vec![]) };
}
#[cfg(test)]
fn get_env_args() -> Vec<String> {
    ENV_ARGS.with(|vec| vec.borrow().clone())
}

#[cfg(test)]
/// When running tests, env args are set from within the app.
/// You can set them up from there by wrapping your test with this function.
pub fn with_env_args<F, T>(args: Vec<String>, function: F) -> T
where
    F: FnOnce() -> T,
{
    ENV_ARGS.with(|refcell| {
        let old_value = refcell.replace(args);
        let result = function();
        refcell.replace(old_value);
        result
    })
}

#[cfg(test)]
pub mod tests {
    use parameterized::{ide, parameterized};

    use crate::tools::env_args::{retrieve_arg_value, retrieve_arg_value_or_default, with_env_args};

    ide!();

    #[parameterized(
        args = {vec!["-p=8080".to_owned()], vec!["--port=8080".to_owned()], vec!["--templates=./tpl".to_owned()], vec!["--port=".to_owned()], vec!["--portal=8080".to_owned()], vec!["--another-arg=wrong".to_owned()]},
        arg_names = {vec!["-p", "--port"], vec!["-p", "--port"], vec!["--templates"], vec!["-p", "--port"], vec!["-p", "--port"], vec!["-p", "--port"]},
        expected_result = {Some("8080".to_owned()), Some("8080".to_owned()), Some("./tpl".to_owned()), None, None, None}
    )]
    fn should_retrieve_arg_value(
        args: Vec<String>,
        arg_names: Vec<&str>,
        expected_result: Option<String>,
    ) {
        let result = with_env_args(args, || retrieve_arg_value(arg_names));
        assert_eq!(expected_result, result);
    }

    #[test]
    fn should_keep_equal_signs_in_value() {
        let result = with_env_args(vec!["--templates=a=b".to_owned()], || {
            retrieve_arg_value("--templates")
        });

        assert_eq!(Some("a=b".to_owned()), result);
    }

    #[test]
    fn should_retrieve_arg_value_or_default() {
        let args = vec!["--static-files=/srv/static".to_owned()];

        let (custom, default) = with_env_args(args, || {
            (
                retrieve_arg_value_or_default("--static-files", "./public/static"),
                retrieve_arg_value_or_default("--templates", "./templates"),
            )
        });

        assert_eq!("/srv/static", custom);
        assert_eq!("./templates", default);
    }
}
