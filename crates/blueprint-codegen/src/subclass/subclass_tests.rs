#![allow(non_snake_case)]

use super::*;
use syn::Item;

fn expand(item: ItemTrait) -> GeneratedSubclass {
    generate(&item, &GenerateArgs::default(), &GeneratorOptions::default()).unwrap()
}

fn expand_with(item: ItemTrait, args: TokenStream) -> GeneratedSubclass {
    let args = GenerateArgs::from_tokens(args).unwrap();
    generate(&item, &args, &GeneratorOptions::default()).unwrap()
}

fn squashed(tokens: &TokenStream) -> String {
    tokens.to_string().split_whitespace().collect()
}

fn person() -> ItemTrait {
    parse_quote! {
        /// Someone with a name.
        pub trait Person {
            #[validate(non_empty)]
            #[normalize(value.trim().to_string())]
            fn name(&self) -> &str;
            fn set_name(&mut self, name: String);

            #[default(0)]
            fn age(&self) -> u32;
            fn set_age(&mut self, _: u32) -> Result<(), PersonError>;

            fn greeting(&self) -> String {
                format!("Hello {}", self.name())
            }
        }
    }
}

#[test]
fn generate___items___parse_as_a_file() {
    let generated = expand(person());

    let file: syn::File = syn::parse2(generated.items).unwrap();

    let structs: Vec<String> = file
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Struct(item) => Some(item.ident.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(
        structs,
        vec!["PersonSubclass", "PersonSubclassBuilder", "InnerPersonSubclassBuilder"]
    );
}

#[test]
fn generate___struct___keeps_trait_docs_and_derives() {
    let items = expand(person()).items;

    assert!(items.to_string().contains("\"Someone with a name.\""));
    assert!(squashed(&items).contains("#[derive(Debug,Clone)]pubstructPersonSubclass"));
}

#[test]
fn generate___new___normalizes_then_checks_preconditions() {
    let generated = squashed(&expand(person()).items);

    assert!(generated.contains(
        "pubfnnew(name:::std::string::String,age:u32)->::std::result::Result<Self,::blueprint::__private::ContractViolation>"
    ));
    let normalize = generated.find("letname={letvalue=name;value.trim().to_string()};").unwrap();
    let check = generated.find("letvalue=&name;").unwrap();
    assert!(normalize < check);
}

#[test]
fn generate___getter___checks_postconditions_and_borrows() {
    let generated = squashed(&expand(person()).items);

    assert!(generated.contains("ContractViolation::postcondition"));
    assert!(generated.contains("self.name.as_str()"));
    assert!(generated.contains("fnage(&self)->u32{::std::clone::Clone::clone(&self.age)}"));
}

#[test]
fn generate___setter___raises_unless_result() {
    let generated = squashed(&expand(person()).items);

    assert!(generated.contains("fnset_name(&mutself,name:String){"));
    assert!(generated.contains("violation.raise();"));
    assert!(generated.contains("self.name=name;}"));
}

#[test]
fn generate___fallible_setter___renames_argument_and_returns_ok() {
    let generated = squashed(&expand(person()).items);

    assert!(generated.contains(
        "fnset_age(&mutself,age:u32)->Result<(),PersonError>{self.age=age;::std::result::Result::Ok(())}"
    ));
}

#[test]
fn generate___trait___loses_generator_attributes() {
    let generated = expand(person());

    let cleaned = generated.item.to_token_stream().to_string();

    assert!(!cleaned.contains("validate"));
    assert!(!cleaned.contains("normalize"));
    assert!(!cleaned.contains("default"));
    assert!(cleaned.contains("Someone with a name."));
}

#[test]
fn generate___provided_method___is_not_reimplemented() {
    let generated = squashed(&expand(person()).items);

    assert!(!generated.contains("fngreeting"));
}

#[test]
fn generate___derived_field___computed_from_borrowed_fields() {
    let generated = squashed(
        &expand(parse_quote! {
            trait Rectangle {
                fn width(&self) -> u32;
                fn height(&self) -> u32;
                #[derived(width * height)]
                fn area(&self) -> u32;
            }
        })
        .items,
    );

    assert!(generated.contains("fnnew(width:u32,height:u32)->Self"));
    assert!(generated.contains(
        "letarea:u32={#[allow(unused_variables)]letwidth=&width;#[allow(unused_variables)]letheight=&height;width*height};"
    ));
    assert!(generated.contains("Self{width,height,area}"));
}

#[test]
fn generate___logged_getter___moves_body_to_inherent_method() {
    let generated = squashed(
        &expand(parse_quote! {
            trait Person {
                #[logged(level = "info")]
                fn name(&self) -> String;
            }
        })
        .items,
    );

    assert!(generated.contains("fnlogged_name(&self)->String{::std::clone::Clone::clone(&self.name)}"));
    assert!(generated.contains(
        "fnname(&self)->String{::blueprint::__private::LoggedCall::run(::blueprint::__private::Level::Information,\"name\",||self.logged_name())}"
    ));
}

#[test]
fn generate___logged_provided_method___is_wrapped_in_trait() {
    let generated = expand(parse_quote! {
        trait Person {
            fn name(&self) -> String;

            #[logged]
            fn shout(&self) {
                println!("{}", self.name());
            }
        }
    });

    let cleaned = squashed(&generated.item.to_token_stream());

    assert!(cleaned.contains(
        "fnshout(&self){::blueprint::__private::LoggedCall::run_unit(::blueprint::__private::Level::Verbose,\"shout\",||{println!(\"{}\",self.name());})}"
    ));
    assert!(!cleaned.contains("#[logged]"));
}

#[test]
fn generate___builder_false___skips_builder() {
    let generated = expand_with(person(), quote!(builder = false));

    assert!(!squashed(&generated.items).contains("PersonSubclassBuilder"));
}

#[test]
fn generate___converter___adds_convertible_impl() {
    let generated = expand_with(person(), quote!(converter, name = "Employee"));

    let items = squashed(&generated.items);
    assert!(items.contains("impl::blueprint::__private::ConvertibleforEmployee"));
    assert!(items.contains("::std::result::Result::Ok(Employee::new(name,age)?)"));
}

#[test]
fn generate___options___control_companions() {
    let options = GeneratorOptions {
        builders: false,
        representing: false,
        converters: true,
        ..GeneratorOptions::default()
    };

    let generated = generate(&person(), &GenerateArgs::default(), &options).unwrap();

    let items = squashed(&generated.items);
    assert!(!items.contains("Builder"));
    assert!(!items.contains("PartialEq"));
    assert!(items.contains("Convertible"));
}

#[test]
fn generate___analysis_errors___are_returned() {
    let item: ItemTrait = parse_quote! {
        trait Broken {
            fn set_value(&mut self, value: u8);
        }
    };

    let result = generate(&item, &GenerateArgs::default(), &GeneratorOptions::default());

    assert!(result.is_err());
}

#[test]
fn strip_helpers___keeps_foreign_attributes() {
    let item: ItemTrait = parse_quote! {
        trait Person {
            #[must_use]
            #[validate(non_empty)]
            fn name(&self) -> String;
        }
    };

    let stripped = squashed(&strip_helpers(&item).to_token_stream());

    assert!(stripped.contains("#[must_use]"));
    assert!(!stripped.contains("validate"));
}
