use crate::{
    error::{LaadsError, LaadsResult},
    product::Product,
};
use regex::Regex;

// e.g. `.A2020005.006.2020007031234`
const FILENAME_BODY_LEN: usize = 27;

/// Pull the first `<code>` + 27 characters + `.hdf` file name out of a data pool listing page.
pub fn find_product_file(page: &str, prod: Product) -> LaadsResult<String> {
    let pattern = format!(
        r"{}.{{{}}}\.hdf",
        regex::escape(prod.code()),
        FILENAME_BODY_LEN
    );
    let regex = Regex::new(&pattern)?;

    regex
        .find(page)
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| LaadsError::not_found(format!("no {} file in listing", prod.code())))
}
