//! JavaScript snippets evaluated in the page to inspect located elements.

use crate::types::{By, ElementState, Locator};

/// Expression evaluating to an array of every element matched by `locator`.
pub fn resolve_all(locator: &Locator) -> String {
    let selector = js_string(&locator.selector);
    match locator.by {
        By::Css => format!("Array.from(document.querySelectorAll({}))", selector),
        By::XPath => format!(
            r#"(function() {{
                const snapshot = document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
                const found = [];
                for (let i = 0; i < snapshot.snapshotLength; i++) {{
                    found.push(snapshot.snapshotItem(i));
                }}
                return found;
            }})()"#,
            selector
        ),
    }
}

pub fn count(locator: &Locator) -> String {
    format!("{}.length", resolve_all(locator))
}

/// Evaluates to `true` when the first matched element satisfies `state`.
pub fn check_state(locator: &Locator, state: ElementState) -> String {
    let condition = match state {
        ElementState::Present => "true",
        ElementState::Visible => "isVisible(element)",
        ElementState::Clickable => {
            "isVisible(element) && !element.disabled && window.getComputedStyle(element).pointerEvents !== 'none'"
        }
    };

    format!(
        r#"(function() {{
            const isVisible = (el) => {{
                const rect = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                return rect.width > 0 &&
                       rect.height > 0 &&
                       style.visibility !== 'hidden' &&
                       style.display !== 'none' &&
                       parseFloat(style.opacity) > 0;
            }};
            const element = {}[0];
            if (!element) return false;
            return {};
        }})()"#,
        resolve_all(locator),
        condition
    )
}

/// Evaluates to the visible text of the first match, or `null`.
pub fn text(locator: &Locator) -> String {
    format!(
        r#"(function() {{
            const element = {}[0];
            if (!element) return null;
            return element.innerText !== undefined ? element.innerText : element.textContent;
        }})()"#,
        resolve_all(locator)
    )
}

/// Empties the first match's value, firing `input`/`change`; evaluates to `false` when nothing matched.
pub fn clear(locator: &Locator) -> String {
    format!(
        r#"(function() {{
            const element = {}[0];
            if (!element) return false;
            element.focus();
            element.value = '';
            element.dispatchEvent(new Event('input', {{ bubbles: true }}));
            element.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
        }})()"#,
        resolve_all(locator)
    )
}

fn js_string(raw: &str) -> String {
    // A JSON string literal is a valid JavaScript string literal.
    serde_json::Value::String(raw.to_string()).to_string()
}
