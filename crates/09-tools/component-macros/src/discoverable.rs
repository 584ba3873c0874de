//! 可发现类型宏实现

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Error, Expr,
    Fields, Ident, ItemStruct, Lit, Meta, Result, Token,
};

/// 可发现类型参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverableArgs {
    /// 实现值转换器契约
    pub converter: bool,
    /// 实现集合处理器契约
    pub collection_handler: bool,
    /// 实现逻辑安全检查契约
    pub secured_check: bool,
    /// 应用入口
    pub entry_point: bool,
    /// 使用 `Default` 构造
    pub no_arg: bool,
    /// 使用 `FromContext` 构造
    pub with_context: bool,
    /// 抽象类型，不参与实例化
    pub abstract_type: bool,
    /// 命名空间，缺省时取模块路径
    pub namespace: Option<String>,
    /// 简单名，缺省时取结构体名
    pub name: Option<String>,
    /// 严格源声明的目标
    pub map_to: Option<String>,
    /// 严格目标声明的源
    pub map_from: Option<String>,
    /// 直接超类型
    pub extends: Vec<String>,
    /// 能力检测时需要一并解析的类型
    pub requires: Vec<String>,
}

impl DiscoverableArgs {
    /// 是否声明了任何契约
    pub fn has_contract(&self) -> bool {
        self.converter || self.collection_handler || self.secured_check
    }

    /// 实现了契约但未指定构造方式时，默认使用无参构造
    pub fn uses_no_arg(&self) -> bool {
        !self.abstract_type && (self.no_arg || (self.has_contract() && !self.with_context))
    }

    /// 是否使用上下文构造
    pub fn uses_context(&self) -> bool {
        !self.abstract_type && self.with_context
    }
}

impl Parse for DiscoverableArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = DiscoverableArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) => {
                    let flag = if path.is_ident("converter") {
                        &mut args.converter
                    } else if path.is_ident("collection_handler") {
                        &mut args.collection_handler
                    } else if path.is_ident("secured_check") {
                        &mut args.secured_check
                    } else if path.is_ident("entry_point") {
                        &mut args.entry_point
                    } else if path.is_ident("no_arg") {
                        &mut args.no_arg
                    } else if path.is_ident("with_context") {
                        &mut args.with_context
                    } else if path.is_ident("abstract_type") {
                        &mut args.abstract_type
                    } else {
                        return Err(Error::new_spanned(path, "未知的 discoverable 参数"));
                    };
                    *flag = true;
                }
                Meta::NameValue(nv) => {
                    let value = string_value(&nv.value)?;
                    if nv.path.is_ident("namespace") {
                        args.namespace = Some(value);
                    } else if nv.path.is_ident("name") {
                        args.name = Some(value);
                    } else if nv.path.is_ident("map_to") {
                        args.map_to = Some(value);
                    } else if nv.path.is_ident("map_from") {
                        args.map_from = Some(value);
                    } else if nv.path.is_ident("extends") {
                        args.extends.push(value);
                    } else if nv.path.is_ident("requires") {
                        args.requires.push(value);
                    } else {
                        return Err(Error::new_spanned(nv.path, "未知的 discoverable 参数"));
                    }
                }
                Meta::List(list) => {
                    return Err(Error::new_spanned(list, "discoverable 参数不支持列表形式"));
                }
            }
        }

        if args.map_to.is_some() && args.map_from.is_some() {
            return Err(Error::new(
                Span::call_site(),
                "同一类型不能同时声明 map_to 和 map_from",
            ));
        }

        Ok(args)
    }
}

fn string_value(expr: &Expr) -> Result<String> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }
    Err(Error::new_spanned(expr, "参数值必须是字符串字面量"))
}

/// 实现 #[discoverable] 宏
pub fn discoverable_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let discoverable_args = if args.is_empty() {
        DiscoverableArgs::default()
    } else {
        match syn::parse::<DiscoverableArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);

    match expand(&discoverable_args, &input_struct) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(args: &DiscoverableArgs, input_struct: &ItemStruct) -> Result<proc_macro2::TokenStream> {
    if !input_struct.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input_struct.generics,
            "可发现类型不能带泛型参数",
        ));
    }

    let struct_name = &input_struct.ident;
    let struct_name_string = struct_name.to_string();
    let simple_name = args.name.as_deref().unwrap_or(&struct_name_string);

    let namespace = match &args.namespace {
        Some(namespace) => quote! { ::std::string::String::from(#namespace) },
        None => quote! { ::std::module_path!().replace("::", ".") },
    };

    let properties = property_names(&input_struct.fields);
    let descriptor_body = descriptor_chain(args);

    let component_impl = component_impl(args, struct_name, simple_name);
    let registration_code = generate_registration_code(struct_name);

    Ok(quote! {
        #input_struct

        impl #struct_name {
            /// 类型描述符
            pub fn type_descriptor() -> autoconfig_common::TypeDescriptor {
                let namespace = #namespace;
                autoconfig_common::TypeDescriptor::in_namespace(&namespace, #simple_name)
                    .for_type::<#struct_name>()
                    #(.with_property(#properties))*
                    #descriptor_body
            }
        }

        #component_impl

        #registration_code
    })
}

/// 命名字段按声明顺序作为属性
fn property_names(fields: &Fields) -> Vec<String> {
    match fields {
        Fields::Named(fields_named) => fields_named
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
            .collect(),
        _ => Vec::new(),
    }
}

fn descriptor_chain(args: &DiscoverableArgs) -> proc_macro2::TokenStream {
    let mut chain = proc_macro2::TokenStream::new();

    if args.converter {
        chain.extend(quote! { .implementing(autoconfig_common::Contract::bean_converter()) });
    }
    if args.collection_handler {
        chain.extend(quote! { .implementing(autoconfig_common::Contract::collection_handler()) });
    }
    if args.secured_check {
        chain.extend(quote! { .implementing(autoconfig_common::Contract::logic_secured_check()) });
    }
    if args.entry_point {
        chain.extend(quote! { .marked(autoconfig_common::Marker::ENTRY_POINT) });
    }
    for supertype in &args.extends {
        chain.extend(quote! { .extending(#supertype) });
    }
    for dependency in &args.requires {
        chain.extend(quote! { .requiring(#dependency) });
    }
    if let Some(target) = &args.map_to {
        chain.extend(quote! { .mapped_to(#target) });
    }
    if let Some(source) = &args.map_from {
        chain.extend(quote! { .mapped_from(#source) });
    }
    if args.abstract_type {
        chain.extend(quote! { .abstract_type() });
    }
    if args.uses_no_arg() {
        chain.extend(quote! { .with_default_constructor::<Self>() });
    }
    if args.uses_context() {
        chain.extend(quote! { .with_from_context::<Self>() });
    }

    chain
}

fn component_impl(
    args: &DiscoverableArgs,
    struct_name: &Ident,
    simple_name: &str,
) -> proc_macro2::TokenStream {
    let mut casts = proc_macro2::TokenStream::new();

    if args.converter {
        casts.extend(quote! {
            fn as_bean_converter(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::option::Option<::std::sync::Arc<dyn autoconfig_common::BeanConverter>> {
                ::std::option::Option::Some(self)
            }
        });
    }
    if args.collection_handler {
        casts.extend(quote! {
            fn as_collection_handler(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::option::Option<::std::sync::Arc<dyn autoconfig_common::CollectionHandler>> {
                ::std::option::Option::Some(self)
            }
        });
    }
    if args.secured_check {
        casts.extend(quote! {
            fn as_logic_secured_check(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::option::Option<::std::sync::Arc<dyn autoconfig_common::LogicSecuredCheck>> {
                ::std::option::Option::Some(self)
            }
        });
    }

    quote! {
        impl autoconfig_common::Component for #struct_name {
            fn name(&self) -> &'static str {
                #simple_name
            }

            #casts
        }
    }
}

/// 生成注册到全局类型目录的代码
fn generate_registration_code(struct_name: &Ident) -> proc_macro2::TokenStream {
    let registration_fn_name = Ident::new(
        &format!(
            "__register_discoverable_{}",
            struct_name.to_string().to_lowercase()
        ),
        Span::call_site(),
    );

    quote! {
        // 使用 ctor 在程序启动时注册类型描述符
        #[ctor::ctor]
        fn #registration_fn_name() {
            let descriptor = #struct_name::type_descriptor();
            let qualified_name = descriptor.qualified_name().to_string();
            if let Err(e) = autoconfig_common::register_global_type(descriptor) {
                eprintln!("Failed to register discoverable type {}: {}", qualified_name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = DiscoverableArgs::default();
        assert!(!args.converter);
        // 只承载元数据的类型不需要构造
        assert!(!args.uses_no_arg());
        assert!(!args.uses_context());
        assert_eq!(args.namespace, None);
    }

    #[test]
    fn test_parse_flags_and_values() {
        let args: DiscoverableArgs = syn::parse_str(
            r#"converter, with_context, namespace = "app.convert", extends = "app.Base", extends = "app.Other""#,
        )
        .expect("参数应该能解析");

        assert!(args.converter);
        assert!(args.with_context);
        assert!(!args.uses_no_arg());
        assert!(args.uses_context());
        assert_eq!(args.namespace.as_deref(), Some("app.convert"));
        assert_eq!(args.extends, vec!["app.Base".to_string(), "app.Other".to_string()]);
    }

    #[test]
    fn test_contract_defaults_to_no_arg() {
        let args: DiscoverableArgs = syn::parse_str("collection_handler").expect("参数应该能解析");
        assert!(args.uses_no_arg());
        assert!(!args.uses_context());
    }

    #[test]
    fn test_both_constructors() {
        let args: DiscoverableArgs =
            syn::parse_str("no_arg, with_context").expect("参数应该能解析");
        assert!(args.uses_no_arg());
        assert!(args.uses_context());
    }

    #[test]
    fn test_abstract_type_has_no_constructor() {
        let args: DiscoverableArgs = syn::parse_str("abstract_type").expect("参数应该能解析");
        assert!(!args.uses_no_arg());
        assert!(!args.uses_context());
    }

    #[test]
    fn test_pair_declarations() {
        let args: DiscoverableArgs =
            syn::parse_str(r#"map_to = "app.model.Person""#).expect("参数应该能解析");
        assert_eq!(args.map_to.as_deref(), Some("app.model.Person"));

        let conflicting =
            syn::parse_str::<DiscoverableArgs>(r#"map_to = "a.B", map_from = "a.C""#);
        assert!(conflicting.is_err());
    }

    #[test]
    fn test_unknown_argument_is_rejected() {
        assert!(syn::parse_str::<DiscoverableArgs>("singleton").is_err());
        assert!(syn::parse_str::<DiscoverableArgs>("name = 3").is_err());
    }

    #[test]
    fn test_expansion_registers_and_casts() {
        let args: DiscoverableArgs =
            syn::parse_str(r#"converter, namespace = "app.convert""#).expect("参数应该能解析");
        let input: ItemStruct =
            syn::parse_str("pub struct MoneyConverter { scale: u32 }").expect("结构体应该能解析");

        let expanded = expand(&args, &input).expect("展开应该成功").to_string();

        assert!(expanded.contains("as_bean_converter"));
        assert!(!expanded.contains("as_collection_handler"));
        assert!(expanded.contains("register_global_type"));
        assert!(expanded.contains("__register_discoverable_moneyconverter"));
        assert!(expanded.contains("\"scale\""));
        assert!(expanded.contains("with_default_constructor"));
    }

    #[test]
    fn test_generic_struct_is_rejected() {
        let input: ItemStruct =
            syn::parse_str("struct Wrapper<T> { inner: T }").expect("结构体应该能解析");
        assert!(expand(&DiscoverableArgs::default(), &input).is_err());
    }
}
