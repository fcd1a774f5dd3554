/// Markup from its JSON form, written inline.
///
/// ```
/// let mut list = dao::markup!(["ul", {"class": "menu"}, ["li", "Home"]]);
/// assert_eq!(list.tagname(None), Some("ul"));
/// ```
#[macro_export]
macro_rules! markup {
    ($($json:tt)+) => {
        $crate::Markup::from_json(&$crate::__private::serde_json::json!($($json)+))
    };
}

/// An [`Attributes`](crate::Attributes) mapping in insertion order.
///
/// ```
/// let attrs = dao::attrs! { "id" => "main", "tabindex" => 0 };
/// assert_eq!(attrs.keys().collect::<Vec<_>>(), ["id", "tabindex"]);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::Attributes::new();
        $(attributes.insert($key, $value);)+
        attributes
    }};
}
