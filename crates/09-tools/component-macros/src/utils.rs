//! 宏工具函数

use proc_macro2::Span;
use syn::{Attribute, Ident, LitStr, Meta, Result, Type, TypeParamBound};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) => {
            if let Some(segment) = type_path.path.segments.last() {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                        return Some(inner_type);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// 类型路径的最后一段名称
///
/// 对 trait object 取第一个 trait 约束的最后一段，`dyn http::Request` → `Request`。
pub fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        Type::TraitObject(object) => object.bounds.iter().find_map(|bound| match bound {
            TypeParamBound::Trait(trait_bound) => trait_bound
                .path
                .segments
                .last()
                .map(|segment| segment.ident.to_string()),
            _ => None,
        }),
        Type::Paren(paren) => last_segment_name(&paren.elem),
        Type::Group(group) => last_segment_name(&group.elem),
        _ => None,
    }
}

/// 检查类型是否为 `Autowired<T>`
pub fn is_autowired_type(ty: &Type) -> bool {
    last_segment_name(ty).as_deref() == Some("Autowired") && extract_generic_type(ty).is_some()
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

/// 生成唯一的标识符
pub fn generate_unique_ident(base_name: &str, suffix: &str) -> Ident {
    let unique_name = format!("__xmvc_{}_{}", suffix, base_name);
    Ident::new(&unique_name, Span::call_site())
}

/// 检查属性名称
pub fn is_attribute(attr: &Attribute, attr_name: &str) -> bool {
    attr.path().is_ident(attr_name)
}

/// 从属性列表中移除并返回指定属性
pub fn take_attribute(attrs: &mut Vec<Attribute>, attr_name: &str) -> Option<Attribute> {
    let position = attrs.iter().position(|attr| is_attribute(attr, attr_name))?;
    Some(attrs.remove(position))
}

/// 读取属性中的可选字符串参数
///
/// `#[attr]` → `None`，`#[attr("value")]` → `Some("value")`
pub fn optional_string_arg(attr: &Attribute) -> Result<Option<String>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(_) => attr.parse_args::<LitStr>().map(|lit| Some(lit.value())),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "expected `#[attr]` or `#[attr(\"value\")]`",
        )),
    }
}

/// 读取属性中的必需字符串参数
pub fn required_string_arg(attr: &Attribute) -> Result<String> {
    optional_string_arg(attr)?.ok_or_else(|| {
        syn::Error::new_spanned(attr, "expected a string argument, e.g. `(\"/path\")`")
    })
}
