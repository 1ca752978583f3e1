//! The canonical course outline
//!
//! Chapter order is the sidebar order. Topic ids double as lesson keys, so they
//! must stay unique across the whole tree.

use super::{Chapter, Curriculum, Difficulty, Topic};

/// The full course, from the first Python steps to the final exam
pub static CURRICULUM: Curriculum = Curriculum::new(&[
    Chapter::new("mod-1", "Módulo 1: Introdução ao Python", MOD_1),
    Chapter::new("mod-2", "Módulo 2: Estruturas de Controle", MOD_2),
    Chapter::new("mod-3", "Módulo 3: Tipos e Estruturas", MOD_3),
    Chapter::new("mod-4", "Módulo 4: Operadores", MOD_4),
    Chapter::new("mod-5", "Módulo 5: Funções", MOD_5),
    Chapter::new("mod-6", "Módulo 6: Orientação a Objetos", MOD_6),
    Chapter::new("mod-7", "Módulo 7: Exceções", MOD_7),
    Chapter::new("mod-8", "Módulo 8: Ficheros (Arquivos)", MOD_8),
    Chapter::new("mod-9", "Módulo 9: Computação Científica", MOD_9),
    Chapter::new("mod-10", "Módulo 10: Modularização", MOD_10),
    Chapter::new("mod-eval", "Avaliação", MOD_EVAL),
    Chapter::new("mod-biblio", "Bibliografia", MOD_BIBLIO),
]);

const fn topic(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    prompt_context: &'static str,
) -> Topic {
    Topic { id, title, description, difficulty, prompt_context }
}

const MOD_1: &[Topic] = &[
    topic(
        "m1-what-is",
        "O que é Python?",
        "Conceitos fundamentais.",
        Difficulty::Green,
        "Explique o que é Python.",
    ),
    topic(
        "m1-install",
        "Baixar e Instalar Python",
        "Configuração do ambiente.",
        Difficulty::Green,
        "Como instalar Python.",
    ),
    topic(
        "m1-hello",
        "Olá Mundo em Python",
        "Primeiro programa.",
        Difficulty::Green,
        "Hello World.",
    ),
    topic(
        "m1-syntax",
        "Sintaxe Básica",
        "Indentação e estrutura.",
        Difficulty::Green,
        "Sintaxe básica.",
    ),
    topic(
        "m1-vars",
        "Nomeando Variáveis I",
        "Convenções de nomes.",
        Difficulty::Green,
        "Snake case e variáveis.",
    ),
    topic(
        "m1-reserved",
        "Palavras Reservadas",
        "Keywords proibidas.",
        Difficulty::Orange,
        "Keywords do Python.",
    ),
    topic(
        "m1-scope",
        "Escopo de Variáveis",
        "Local vs Global.",
        Difficulty::Orange,
        "Escopo LEGB.",
    ),
    topic(
        "m1-exec",
        "Executando Scripts",
        "Rodando arquivos .py.",
        Difficulty::Orange,
        "Como rodar .py.",
    ),
    topic(
        "m1-typing",
        "Tipagem Dinâmica e Duck Typing",
        "Sistema de tipos.",
        Difficulty::Orange,
        "Duck typing.",
    ),
    topic(
        "m1-builtin",
        "Funções Built-in",
        "Funções nativas.",
        Difficulty::Orange,
        "Print, len, type, etc.",
    ),
    topic(
        "m1-unpacking",
        "Unpacking em Python",
        "Desempacotamento de sequências.",
        Difficulty::Orange,
        "Unpacking de tuplas.",
    ),
];

const MOD_2: &[Topic] = &[
    topic(
        "m2-if",
        "Condicional if",
        "Tomada de decisão.",
        Difficulty::Green,
        "If, elif, else.",
    ),
    topic(
        "m2-for",
        "Loop for",
        "Iteração definida.",
        Difficulty::Green,
        "For loops.",
    ),
    topic(
        "m2-range",
        "Range",
        "Gerador de sequências.",
        Difficulty::Green,
        "Função range().",
    ),
    topic(
        "m2-while",
        "Loop while",
        "Iteração indefinida.",
        Difficulty::Green,
        "While loops.",
    ),
    topic(
        "m2-switch",
        "Switch (Simulação)",
        "Alternativas ao switch clássico.",
        Difficulty::Orange,
        "Como simular switch antes do 3.10.",
    ),
    topic(
        "m2-match",
        "Match",
        "Pattern Matching (3.10+).",
        Difficulty::Orange,
        "Match case.",
    ),
    topic(
        "m2-break",
        "Break",
        "Interromper loops.",
        Difficulty::Orange,
        "Uso do break.",
    ),
    topic(
        "m2-continue",
        "Continue",
        "Pular iteração.",
        Difficulty::Orange,
        "Uso do continue.",
    ),
    topic(
        "m2-zip",
        "Iterar com zip",
        "Iteração paralela.",
        Difficulty::Orange,
        "Função zip.",
    ),
    topic(
        "m2-enumerate",
        "Iterar com enumerate",
        "Índice e valor.",
        Difficulty::Orange,
        "Função enumerate.",
    ),
    topic(
        "m2-listcomp",
        "List Comprehensions",
        "Listas concisas.",
        Difficulty::Orange,
        "List comprehensions.",
    ),
    topic(
        "m2-iterators",
        "Iteradores e Iteráveis",
        "Protocolo de iteração.",
        Difficulty::Red,
        "Iterators vs Iterables.",
    ),
];

const MOD_3: &[Topic] = &[
    topic(
        "m3-int",
        "Inteiro (int)",
        "Números inteiros.",
        Difficulty::Green,
        "Tipo int.",
    ),
    topic(
        "m3-bool",
        "Booleano",
        "Lógica binária.",
        Difficulty::Green,
        "Tipo bool.",
    ),
    topic(
        "m3-float",
        "Float",
        "Ponto flutuante.",
        Difficulty::Green,
        "Tipo float e precisão.",
    ),
    topic(
        "m3-complex",
        "Números Complexos",
        "Matemática complexa.",
        Difficulty::Green,
        "Tipo complex.",
    ),
    topic(
        "m3-str",
        "Cadeias (Strings)",
        "Texto.",
        Difficulty::Green,
        "Strings.",
    ),
    topic(
        "m3-list",
        "Listas",
        "Vetores dinâmicos.",
        Difficulty::Green,
        "Listas e métodos.",
    ),
    topic(
        "m3-set",
        "Set",
        "Conjuntos únicos.",
        Difficulty::Orange,
        "Sets.",
    ),
    topic(
        "m3-tuple",
        "Tupla (Tuple)",
        "Sequências imutáveis.",
        Difficulty::Orange,
        "Tuplas.",
    ),
    topic(
        "m3-dict",
        "Dicionário",
        "Chave-Valor.",
        Difficulty::Orange,
        "Dicts.",
    ),
    topic(
        "m3-frozenset",
        "Frozenset",
        "Conjuntos imutáveis.",
        Difficulty::Orange,
        "Frozenset.",
    ),
    topic(
        "m3-castings",
        "Castings",
        "Conversão de tipos.",
        Difficulty::Orange,
        "Type casting.",
    ),
    topic(
        "m3-collections",
        "Coleções",
        "Tipos de container especializados.",
        Difficulty::Orange,
        "Collections module.",
    ),
    topic(
        "m3-mutability",
        "Mutabilidade",
        "Conceito de memória.",
        Difficulty::Orange,
        "Mutable vs Immutable.",
    ),
];

const MOD_4: &[Topic] = &[
    topic(
        "m4-assign",
        "Operadores de Atribuição",
        "Atribuindo valores.",
        Difficulty::Green,
        "Atribuição.",
    ),
    topic(
        "m4-arith",
        "Operadores Aritméticos",
        "Cálculos matemáticos.",
        Difficulty::Green,
        "Aritmética.",
    ),
    topic(
        "m4-rel",
        "Operadores Relacionais",
        "Comparações.",
        Difficulty::Green,
        "Comparação.",
    ),
    topic(
        "m4-log",
        "Operadores Lógicos",
        "Lógica booleana.",
        Difficulty::Green,
        "Lógica booleana.",
    ),
    topic(
        "m4-bitwise",
        "Operadores Bitwise",
        "Operações bit a bit.",
        Difficulty::Orange,
        "Bitwise ops.",
    ),
    topic(
        "m4-identity",
        "Operadores de Identidade",
        "Teste de objeto.",
        Difficulty::Orange,
        "is vs ==.",
    ),
    topic(
        "m4-member",
        "Operadores de Membresia",
        "Pertinência.",
        Difficulty::Orange,
        "in operator.",
    ),
    topic(
        "m4-walrus",
        "Operador Walrus",
        "Atribuição em expressão.",
        Difficulty::Orange,
        "Walrus operator.",
    ),
];

const MOD_5: &[Topic] = &[
    topic(
        "m5-funcs",
        "Funções em Python",
        "Definição básica.",
        Difficulty::Green,
        "Definindo funções.",
    ),
    topic(
        "m5-pass",
        "Passagem por valor e referência",
        "Comportamento de memória.",
        Difficulty::Orange,
        "Pass by object reference.",
    ),
    topic(
        "m5-args",
        "Uso de args e kwargs",
        "Argumentos variáveis.",
        Difficulty::Orange,
        "*args e **kwargs.",
    ),
    topic(
        "m5-annot",
        "Anotações em Funções",
        "Type Hints.",
        Difficulty::Orange,
        "Type hints.",
    ),
    topic(
        "m5-lambda",
        "Funções Lambda",
        "Funções anônimas.",
        Difficulty::Orange,
        "Lambdas.",
    ),
    topic(
        "m5-recur",
        "Recursividade",
        "Funções recursivas.",
        Difficulty::Orange,
        "Recursion.",
    ),
    topic(
        "m5-deco",
        "Decoradores",
        "Wrappers de função.",
        Difficulty::Red,
        "Decorators.",
    ),
    topic(
        "m5-gen",
        "Geradores",
        "Iteradores preguiçosos.",
        Difficulty::Red,
        "Generators.",
    ),
    topic(
        "m5-coro",
        "Corrotinas",
        "Async/Await.",
        Difficulty::Red,
        "Coroutines.",
    ),
    topic(
        "m5-cache",
        "Caching de Funções",
        "Otimização.",
        Difficulty::Red,
        "Caching e Memoization.",
    ),
    topic(
        "m5-funcprog",
        "Programação Funcional",
        "Map, Filter, Reduce.",
        Difficulty::Red,
        "Functional programming concepts.",
    ),
];

const MOD_6: &[Topic] = &[
    topic(
        "m6-oop",
        "Programação Orientada a Objetos",
        "Conceitos.",
        Difficulty::Green,
        "Intro a POO.",
    ),
    topic(
        "m6-methods",
        "Tipos de métodos",
        "Instância, Classe, Estático.",
        Difficulty::Orange,
        "Types of methods.",
    ),
    topic(
        "m6-inh",
        "Herança",
        "Hierarquia de classes.",
        Difficulty::Orange,
        "Inheritance.",
    ),
    topic(
        "m6-prop",
        "Decorador Property",
        "Getters e Setters.",
        Difficulty::Orange,
        "@property.",
    ),
    topic(
        "m6-dunder",
        "Métodos dunder ou mágicos",
        "Métodos especiais.",
        Difficulty::Orange,
        "Magic methods.",
    ),
    topic(
        "m6-override",
        "Sobrescrevendo métodos mágicos",
        "Operadores customizados.",
        Difficulty::Red,
        "Overriding.",
    ),
    topic(
        "m6-abc",
        "Interfaces e ABC",
        "Classes Abstratas.",
        Difficulty::Red,
        "Abstract Base Classes.",
    ),
    topic(
        "m6-abstract",
        "Abstração",
        "Conceito de design.",
        Difficulty::Green,
        "Abstraction.",
    ),
    topic(
        "m6-coupling",
        "Acoplamento",
        "Dependências.",
        Difficulty::Green,
        "Coupling.",
    ),
    topic(
        "m6-class",
        "Criar classe",
        "Sintaxe.",
        Difficulty::Green,
        "Class syntax.",
    ),
    topic(
        "m6-encap",
        "Encapsulamento",
        "Proteção de dados.",
        Difficulty::Green,
        "Encapsulation.",
    ),
    topic(
        "m6-poly",
        "Polimorfismo",
        "Flexibilidade.",
        Difficulty::Orange,
        "Polymorphism.",
    ),
    topic(
        "m6-cohesion",
        "Coesão",
        "Responsabilidade única.",
        Difficulty::Green,
        "Cohesion.",
    ),
];

const MOD_7: &[Topic] = &[
    topic(
        "m7-ex",
        "Exceções em Python",
        "Tratamento de erros.",
        Difficulty::Green,
        "Exceptions handling.",
    ),
    topic(
        "m7-assert",
        "Uso do assert()",
        "Validações.",
        Difficulty::Green,
        "Assert usage.",
    ),
    topic(
        "m7-define",
        "Definindo Exceções",
        "Erros customizados.",
        Difficulty::Orange,
        "Custom exceptions.",
    ),
    topic(
        "m7-ctx",
        "Context Managers",
        "Declaração with.",
        Difficulty::Red,
        "Context managers.",
    ),
];

const MOD_8: &[Topic] = &[
    topic(
        "m8-read",
        "Ler arquivos",
        "Leitura de dados.",
        Difficulty::Orange,
        "Reading files.",
    ),
    topic(
        "m8-write",
        "Escrever arquivos",
        "Gravação de dados.",
        Difficulty::Orange,
        "Writing files.",
    ),
];

const MOD_9: &[Topic] = &[
    topic(
        "m9-math",
        "Math",
        "Módulo padrão.",
        Difficulty::Orange,
        "Math module.",
    ),
    topic(
        "m9-numpy",
        "NumPy: Arrays N-dimensionais",
        "Computação vetorial.",
        Difficulty::Orange,
        "Numpy basics.",
    ),
    topic(
        "m9-plt",
        "Visualização com Matplotlib",
        "Gráficos.",
        Difficulty::Orange,
        "Matplotlib basics.",
    ),
];

const MOD_10: &[Topic] = &[
    topic(
        "m10-modules",
        "Módulos e Pacotes",
        "Imports, Pip e Venv.",
        Difficulty::Orange,
        "Modules, imports, pip, venv and __name__.",
    ),
];

const MOD_EVAL: &[Topic] = &[
    topic(
        "evaluation-main",
        "Exame Final e Projetos",
        "Download do exame.",
        Difficulty::Red,
        "Exam download.",
    ),
];

const MOD_BIBLIO: &[Topic] = &[
    topic(
        "bibliography-main",
        "Referências e Livros",
        "Material de apoio.",
        Difficulty::Green,
        "Books and references.",
    ),
];
