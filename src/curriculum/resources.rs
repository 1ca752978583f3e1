//! Static data behind the two special pages

/// Kind of an external resource link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Pdf,
    Website,
}

impl ReferenceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Website => "Website",
        }
    }
}

/// A recommended book or site
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub title: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    pub kind: ReferenceKind,
}

/// Final exam page content
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub heading: &'static str,
    pub summary: &'static str,
    pub sheet_title: &'static str,
    pub sheet_description: &'static str,
    pub sheet_href: &'static str,
    pub instructions: &'static [&'static str],
}

pub static EVALUATION: Evaluation = Evaluation {
    heading: "Avaliação Final",
    summary: "Prepare-se para aplicar todo o conhecimento adquirido no curso!",
    sheet_title: "Avaliações do Curso",
    sheet_description: "Faça o download do arquivo PDF contendo os enunciados da avaliação final e as instruções.",
    sheet_href: "https://cz7algaabcz8rpd1.public.blob.vercel-storage.com/Avalia%C3%A7%C3%A3o.pdf",
    instructions: &[
        "São **2 Parcelares** e **1 Exame Final**",
        "Em cada Parcelar deve entregar a culminação de **1 Curso** mostrando o certificado.",
    ],
};

pub static BIBLIOGRAPHY: &[Reference] = &[
    Reference {
        title: "El Libro de Python",
        author: "Equipe Ellibrodepython",
        description: "O material base deste curso. Uma introdução completa e prática.",
        href: "https://ellibrodepython.com/",
        kind: ReferenceKind::Website,
    },
    Reference {
        title: "Curso Intensivo de Python",
        author: "Eric Matthes",
        description: "Um guia prático para iniciantes que desejam aprender Python rapidamente.",
        href: "https://cz7algaabcz8rpd1.public.blob.vercel-storage.com/Curso%20Intensivo%20de%20Python.pdf",
        kind: ReferenceKind::Pdf,
    },
    Reference {
        title: "Python: Escreva seus primeiros programas",
        author: "Felipe Cruz",
        description: "Um livro focado em iniciantes que desejam aprender Python do zero.",
        href: "https://cz7algaabcz8rpd1.public.blob.vercel-storage.com/Python%20Escreva%20seus%20primeiros%20programas.pdf",
        kind: ReferenceKind::Pdf,
    },
    Reference {
        title: "Python para Matemáticos",
        author: "Andréa Lins e Lins Souza",
        description: "Explora o uso de Python em contextos matemáticos, ideal para quem quer aplicar programação em matemática.",
        href: "https://cz7algaabcz8rpd1.public.blob.vercel-storage.com/python%20para%20matem%C3%A1ticos.pdf",
        kind: ReferenceKind::Pdf,
    },
];

impl Evaluation {
    /// Plain markdown rendition, used by `pymath show`
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n{}\n\n## {}\n\n{}\n\n<{}>\n\n", self.heading, self.summary, self.sheet_title, self.sheet_description, self.sheet_href);
        out.push_str("## Instruções Importantes\n\n");
        for item in self.instructions {
            out.push_str(&format!("- {}\n", item));
        }
        out
    }
}

/// Plain markdown rendition of the bibliography, used by `pymath show`
pub fn bibliography_markdown() -> String {
    let mut out = String::from("# Bibliografia Recomendada\n\n");
    for reference in BIBLIOGRAPHY {
        out.push_str(&format!(
            "## {}\n\n*{}* ({})\n\n{}\n\n<{}>\n\n",
            reference.title,
            reference.author,
            reference.kind.label(),
            reference.description,
            reference.href
        ));
    }
    out
}
