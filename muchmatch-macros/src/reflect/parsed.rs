use syn::{
    parse::{Parse, ParseStream, Result as ParseResult},
    spanned::Spanned,
    Attribute, Data, DeriveInput, Error, Fields, Generics, Ident, Index, LitStr, Member,
    Visibility,
};

/// Parsed input of the `Reflect` derive macro.
pub(crate) struct Parsed {
    pub ident: Ident,
    pub generics: Generics,
    pub attribs: ContainerAttribs,
    pub fields: Vec<ParsedField>,
}

#[derive(Default)]
pub(crate) struct ContainerAttribs {
    pub display: bool,
    pub methods: bool,
    pub transparent: bool,
    pub rename: Option<LitStr>,
}

pub(crate) struct ParsedField {
    pub member: Member,
    pub name: String,
    pub hidden: bool,
}

impl Parse for Parsed {
    fn parse(input: ParseStream<'_>) -> ParseResult<Self> {
        let input = input.parse::<DeriveInput>()?;

        let Data::Struct(data) = input.data else {
            return Err(Error::new(
                input.ident.span(),
                "Reflect can only be derived for structs",
            ));
        };

        let attribs = ContainerAttribs::parse(&input.attrs)?;

        let mut fields = Vec::new();
        let named = matches!(data.fields, Fields::Named(_));
        for (index, field) in data.fields.into_iter().enumerate() {
            let mut skip = false;
            let mut hidden = !matches!(field.vis, Visibility::Public(_));

            for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        skip = true;
                    } else if meta.path.is_ident("hidden") {
                        hidden = true;
                    } else {
                        return Err(meta.error("unknown field attribute"));
                    }

                    Ok(())
                })?;
            }

            if skip {
                continue;
            }

            let (member, name) = match field.ident {
                Some(ident) if named => {
                    let name = ident.to_string().trim_start_matches("r#").to_owned();

                    (Member::Named(ident), name)
                }
                _ => {
                    let name = index.to_string();
                    let index = Index {
                        index: u32::try_from(index)
                            .map_err(|_| Error::new(field.ty.span(), "too many fields"))?,
                        span: field.ty.span(),
                    };

                    (Member::Unnamed(index), name)
                }
            };

            fields.push(ParsedField {
                member,
                name,
                hidden,
            });
        }

        if attribs.transparent && fields.len() != 1 {
            return Err(Error::new(
                input.ident.span(),
                "transparent requires exactly one reflected field",
            ));
        }

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            attribs,
            fields,
        })
    }
}

impl ContainerAttribs {
    fn parse(attrs: &[Attribute]) -> ParseResult<Self> {
        let mut ret = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("display") {
                    ret.display = true;
                } else if meta.path.is_ident("methods") {
                    ret.methods = true;
                } else if meta.path.is_ident("transparent") {
                    ret.transparent = true;
                } else if meta.path.is_ident("rename") {
                    ret.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unknown container attribute"));
                }

                Ok(())
            })?;
        }

        Ok(ret)
    }
}
