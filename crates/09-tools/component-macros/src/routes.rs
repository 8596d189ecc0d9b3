//! 控制器处理器宏实现
//!
//! `#[routes]` 读取 impl 块中带 `#[request_mapping]` 的方法，生成处理器描述和按名称调用的分发代码。

use crate::utils::{last_segment_name, required_string_arg, take_attribute};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Result, Type};

/// 请求参数的转换类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedKind {
    Integer,
    Long,
    Text,
    /// `&str`，以借用形式传入
    Str,
}

/// 处理器参数
#[derive(Debug, Clone, PartialEq, Eq)]
enum HandlerParam {
    Request,
    Response,
    Named { name: String, kind: NamedKind },
}

/// 单个处理器
struct Handler {
    method: syn::Ident,
    path: String,
    params: Vec<HandlerParam>,
}

/// 实现 #[routes] 宏
pub fn routes_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(Span::call_site(), "#[routes] takes no arguments")
            .to_compile_error()
            .into();
    }

    let item_impl = match syn::parse::<ItemImpl>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    match expand(item_impl) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

/// 生成处理器表代码
pub fn expand(mut item_impl: ItemImpl) -> Result<TokenStream2> {
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[routes] must be placed on an inherent impl block",
        ));
    }
    if !item_impl.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_impl.generics,
            "#[routes] does not support generic controllers",
        ));
    }

    let mut handlers = Vec::new();
    for item in item_impl.items.iter_mut() {
        if let ImplItem::Fn(method) = item {
            if let Some(handler) = parse_handler(method)? {
                handlers.push(handler);
            }
        }
    }

    let self_ty = &item_impl.self_ty;

    let descriptors = handlers.iter().map(|handler| {
        let name = handler.method.to_string();
        let path = &handler.path;
        let params = handler.params.iter().map(|param| {
            let descriptor = match param {
                HandlerParam::Request => quote! { ::xmvc_common::ParamDescriptor::Request },
                HandlerParam::Response => quote! { ::xmvc_common::ParamDescriptor::Response },
                HandlerParam::Named { name, kind } => {
                    let ty = match kind {
                        NamedKind::Integer => quote! { ::xmvc_common::ParamType::Integer },
                        NamedKind::Long => quote! { ::xmvc_common::ParamType::Long },
                        NamedKind::Text | NamedKind::Str => quote! { ::xmvc_common::ParamType::Text },
                    };
                    quote! { ::xmvc_common::ParamDescriptor::named(#name, #ty) }
                }
            };
            quote! { .with_param(#descriptor) }
        });
        quote! {
            ::xmvc_common::HandlerDescriptor::new(#name, #path) #(#params)*
        }
    });

    let arms = handlers.iter().map(|handler| {
        let method = &handler.method;
        let name = method.to_string();
        let mut bindings = Vec::new();
        let mut call_args = Vec::new();

        for (index, param) in handler.params.iter().enumerate() {
            let binding = format_ident!("__arg{}", index);
            let (next, borrowed) = match param {
                HandlerParam::Request => (quote! { next_request }, false),
                HandlerParam::Response => (quote! { next_response }, false),
                HandlerParam::Named { kind, .. } => match kind {
                    NamedKind::Integer => (quote! { next_integer }, false),
                    NamedKind::Long => (quote! { next_long }, false),
                    NamedKind::Text => (quote! { next_text }, false),
                    NamedKind::Str => (quote! { next_text }, true),
                },
            };
            bindings.push(quote! { let #binding = args.#next()?; });
            call_args.push(if borrowed {
                quote! { &#binding }
            } else {
                quote! { #binding }
            });
        }

        quote! {
            #name => {
                #(#bindings)*
                ::xmvc_common::IntoHandlerResult::into_handler_result(self.#method(#(#call_args),*))
            }
        }
    });

    let expanded = quote! {
        #item_impl

        impl ::xmvc_common::RouteHandlers for #self_ty {
            fn handler_descriptors() -> ::std::vec::Vec<::xmvc_common::HandlerDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            #[allow(unused_mut)]
            fn invoke_handler(
                &self,
                handler: &str,
                mut args: ::xmvc_common::HandlerArguments<'_>,
            ) -> ::xmvc_common::HandlerResult {
                match handler {
                    #(#arms)*
                    _ => ::std::result::Result::Err(::xmvc_common::DispatchError::UnknownHandler {
                        owner: ::xmvc_common::type_identifier::<Self>(),
                        handler: handler.to_string(),
                    }
                    .into()),
                }
            }
        }
    };

    Ok(expanded)
}

/// 解析处理器方法，并移除 `#[request_mapping]` 和 `#[request_param]` 标记
fn parse_handler(method: &mut ImplItemFn) -> Result<Option<Handler>> {
    let Some(mapping) = take_attribute(&mut method.attrs, "request_mapping") else {
        return Ok(None);
    };
    let path = required_string_arg(&mapping)?;

    let signature = &mut method.sig;
    if let Some(asyncness) = &signature.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "request handlers must be synchronous"));
    }
    if !signature.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &signature.generics,
            "request handlers cannot be generic",
        ));
    }

    let mut params = Vec::new();
    let mut has_receiver = false;
    for input in signature.inputs.iter_mut() {
        match input {
            FnArg::Receiver(receiver) => {
                if receiver.reference.is_none() || receiver.mutability.is_some() {
                    return Err(syn::Error::new_spanned(
                        receiver,
                        "request handlers must take `&self`",
                    ));
                }
                has_receiver = true;
            }
            FnArg::Typed(pat_type) => {
                let param_attr = take_attribute(&mut pat_type.attrs, "request_param");
                let param = classify(&pat_type.ty, param_attr.as_ref())?;
                params.push(param);
            }
        }
    }

    if !has_receiver {
        return Err(syn::Error::new_spanned(
            &signature.ident,
            "request handlers must take `&self`",
        ));
    }
    if params.iter().filter(|param| **param == HandlerParam::Response).count() > 1 {
        return Err(syn::Error::new_spanned(
            &signature.inputs,
            "request handlers can take at most one response parameter",
        ));
    }

    Ok(Some(Handler {
        method: signature.ident.clone(),
        path,
        params,
    }))
}

/// 按声明类型确定参数的绑定方式
fn classify(ty: &Type, param_attr: Option<&syn::Attribute>) -> Result<HandlerParam> {
    if let Type::Reference(reference) = ty {
        let target = last_segment_name(&reference.elem);
        match (reference.mutability.is_some(), target.as_deref()) {
            (false, Some("Request")) if param_attr.is_none() => return Ok(HandlerParam::Request),
            (true, Some("Response")) if param_attr.is_none() => return Ok(HandlerParam::Response),
            _ => {}
        }
    }

    let Some(attr) = param_attr else {
        return Err(syn::Error::new_spanned(
            ty,
            "handler parameters must be `&dyn Request`, `&mut dyn Response` or carry #[request_param(\"name\")]",
        ));
    };
    let name = required_string_arg(attr)?;

    let kind = match ty {
        Type::Reference(reference) if reference.mutability.is_none() => {
            match last_segment_name(&reference.elem).as_deref() {
                Some("str") => NamedKind::Str,
                _ => return Err(unsupported(ty)),
            }
        }
        _ => match last_segment_name(ty).as_deref() {
            Some("i32") => NamedKind::Integer,
            Some("i64") => NamedKind::Long,
            Some("String") => NamedKind::Text,
            _ => return Err(unsupported(ty)),
        },
    };

    Ok(HandlerParam::Named { name, kind })
}

fn unsupported(ty: &Type) -> syn::Error {
    syn::Error::new_spanned(
        ty,
        "unsupported request parameter type, expected `i32`, `i64`, `String` or `&str`",
    )
}
