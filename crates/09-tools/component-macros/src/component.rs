//! 组件标记宏实现
//!
//! `#[component]`、`#[controller]` 和 `#[service]` 共用同一套代码生成：
//! 注入 setter、构造函数、类型描述符和启动时注册。

use crate::utils::{
    extract_generic_type, generate_unique_ident, is_autowired_type, optional_string_arg,
    required_string_arg, take_attribute, to_snake_case,
};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Expr, Fields, ItemStruct, Lit, LitStr,
    Meta, Path, Result, Token, Type,
};

/// 组件标记类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// `#[component]`
    Component,
    /// `#[controller]`
    Controller,
    /// `#[service]`
    Service,
}

impl ComponentKind {
    fn attribute_name(self) -> &'static str {
        match self {
            ComponentKind::Component => "component",
            ComponentKind::Controller => "controller",
            ComponentKind::Service => "service",
        }
    }
}

/// 组件标记参数
#[derive(Debug, Clone, Default)]
pub struct ComponentArgs {
    /// 显式组件名称（仅服务）
    pub name: Option<String>,
    /// 声明实现的能力 trait（仅服务）
    pub provides: Vec<Path>,
    /// 自定义构造函数路径，默认使用 `Default::default`
    pub constructor: Option<Path>,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = ComponentArgs::default();

        // `#[service("svc")]` 简写
        if input.peek(LitStr) {
            let name: LitStr = input.parse()?;
            args.name = Some(name.value());
            if input.is_empty() {
                return Ok(args);
            }
            input.parse::<Token![,]>()?;
        }

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = Some(string_value(&nv.value)?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("constructor") => {
                    args.constructor = Some(string_value(&nv.value)?.parse()?);
                }
                Meta::List(list) if list.path.is_ident("provides") => {
                    let traits = list.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
                    args.provides.extend(traits);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unsupported argument, expected `name = \"..\"`, `provides(..)` or `constructor = \"..\"`",
                    ))
                }
            }
        }

        Ok(args)
    }
}

fn string_value(expr: &Expr) -> Result<LitStr> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.clone()),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

impl ComponentArgs {
    fn validate(&self, kind: ComponentKind) -> Result<()> {
        if kind == ComponentKind::Service {
            return Ok(());
        }
        if let Some(path) = self.provides.first() {
            return Err(syn::Error::new_spanned(
                path,
                format!("`provides(..)` is only supported on #[service], not #[{}]", kind.attribute_name()),
            ));
        }
        if self.name.is_some() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!(
                    "#[{}] is always registered under its default name; use #[service(name = \"..\")] instead",
                    kind.attribute_name()
                ),
            ));
        }
        Ok(())
    }
}

/// 注入点
struct InjectionField {
    field: syn::Ident,
    explicit_name: Option<String>,
    declared: Type,
}

/// 实现组件标记宏
pub fn component_impl(kind: ComponentKind, args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = if args.is_empty() {
        ComponentArgs::default()
    } else {
        match syn::parse::<ComponentArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = match syn::parse::<ItemStruct>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    match expand(kind, &component_args, input_struct) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

/// 生成组件代码
pub fn expand(kind: ComponentKind, args: &ComponentArgs, mut input_struct: ItemStruct) -> Result<TokenStream2> {
    args.validate(kind)?;

    if !input_struct.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input_struct.generics,
            "container managed components cannot be generic",
        ));
    }

    let base_path = match take_attribute(&mut input_struct.attrs, "request_mapping") {
        Some(attr) if kind == ComponentKind::Controller => Some(required_string_arg(&attr)?),
        Some(attr) => {
            return Err(syn::Error::new_spanned(
                attr,
                "#[request_mapping] on a struct is only supported together with #[controller]",
            ))
        }
        None => None,
    };

    let injection_fields = collect_injection_fields(&mut input_struct.fields)?;

    let struct_name = &input_struct.ident;
    let snake_name = to_snake_case(&struct_name.to_string());
    let descriptor_fn = generate_unique_ident(&snake_name, "descriptor");
    let factory_fn = generate_unique_ident(&snake_name, "create");
    let register_fn = generate_unique_ident(&snake_name, "register");

    let inject_arms = injection_fields.iter().map(|point| {
        let field = &point.field;
        let field_name = field.to_string();
        quote! {
            #field_name => self.#field.inject_from(&owner, field, bean),
        }
    });

    let invoke_impl = if kind == ComponentKind::Controller {
        quote! {
            fn invoke(
                &self,
                handler: &str,
                args: ::xmvc_common::HandlerArguments<'_>,
            ) -> ::xmvc_common::HandlerResult {
                <Self as ::xmvc_common::RouteHandlers>::invoke_handler(self, handler, args)
            }
        }
    } else {
        quote! {}
    };

    let component_impl = quote! {
        impl ::xmvc_common::Component for #struct_name {
            #[allow(unused_variables)]
            fn inject(
                &self,
                field: &str,
                bean: &::xmvc_common::Bean,
            ) -> ::std::result::Result<(), ::xmvc_common::DependencyError> {
                let owner = ::xmvc_common::type_identifier::<Self>();
                match field {
                    #(#inject_arms)*
                    _ => ::std::result::Result::Err(::xmvc_common::DependencyError::UnknownInjectionPoint {
                        owner,
                        field: field.to_string(),
                    }),
                }
            }

            #invoke_impl
        }
    };

    let tag = match kind {
        ComponentKind::Component => quote! { .component() },
        ComponentKind::Controller => quote! { .controller() },
        ComponentKind::Service => match &args.name {
            Some(name) => quote! { .service(::std::option::Option::Some(#name)) },
            None => quote! { .service(::std::option::Option::None) },
        },
    };

    let base_path = base_path.map(|path| quote! { .with_base_path(#path) });

    let capabilities = args.provides.iter().map(|capability| {
        quote! { .with_capability(::xmvc_common::type_identifier::<dyn #capability>()) }
    });

    let injection_points = injection_fields.iter().map(|point| {
        let field_name = point.field.to_string();
        let declared = &point.declared;
        let explicit = point
            .explicit_name
            .as_ref()
            .map(|name| quote! { .with_explicit_name(#name) });
        quote! {
            .with_injection_point(
                ::xmvc_common::InjectionPoint::new(
                    #field_name,
                    ::xmvc_common::Autowired::<#declared>::declared_type(),
                )
                #explicit
            )
        }
    });

    let handlers = if kind == ComponentKind::Controller {
        quote! { .with_handlers(<#struct_name as ::xmvc_common::RouteHandlers>::handler_descriptors()) }
    } else {
        quote! {}
    };

    let construct = match &args.constructor {
        Some(constructor) => quote! {
            #constructor().map_err(|err| {
                ::xmvc_common::ComponentError::construction_failed(
                    ::xmvc_common::type_identifier::<Self>(),
                    err,
                )
            })?
        },
        None => quote! { <Self as ::std::default::Default>::default() },
    };

    let views = args.provides.iter().map(|capability| {
        quote! { .with_view::<dyn #capability>(instance.clone()) }
    });

    let expanded = quote! {
        #input_struct

        #component_impl

        impl #struct_name {
            #[doc(hidden)]
            pub fn #descriptor_fn() -> ::xmvc_common::TypeDescriptor {
                ::xmvc_common::TypeDescriptor::new(::xmvc_common::type_identifier::<Self>())
                    #tag
                    #base_path
                    #(#capabilities)*
                    #(#injection_points)*
                    #handlers
                    .with_factory(Self::#factory_fn)
            }

            #[doc(hidden)]
            fn #factory_fn() -> ::std::result::Result<::xmvc_common::Bean, ::xmvc_common::ComponentError> {
                let instance = ::std::sync::Arc::new(#construct);
                ::std::result::Result::Ok(
                    ::xmvc_common::Bean::new(instance.clone())
                        #(#views)*
                )
            }
        }

        #[ctor::ctor]
        fn #register_fn() {
            ::xmvc_common::register_type_descriptor(#struct_name::#descriptor_fn);
        }
    };

    Ok(expanded)
}

/// 收集 `#[autowired]` 字段并移除标记
fn collect_injection_fields(fields: &mut Fields) -> Result<Vec<InjectionField>> {
    let mut points = Vec::new();

    let named = match fields {
        Fields::Named(named) => named,
        Fields::Unit => return Ok(points),
        Fields::Unnamed(unnamed) => {
            if unnamed
                .unnamed
                .iter()
                .any(|field| field.attrs.iter().any(|attr| attr.path().is_ident("autowired")))
            {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "#[autowired] requires named fields",
                ));
            }
            return Ok(points);
        }
    };

    for field in named.named.iter_mut() {
        let Some(attr) = take_attribute(&mut field.attrs, "autowired") else {
            continue;
        };
        if !is_autowired_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[autowired] fields must have type `Autowired<T>`",
            ));
        }
        let declared = extract_generic_type(&field.ty)
            .cloned()
            .ok_or_else(|| syn::Error::new_spanned(&field.ty, "missing type argument"))?;
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        points.push(InjectionField {
            field: ident,
            explicit_name: optional_string_arg(&attr)?,
            declared,
        });
    }

    Ok(points)
}
