//! Lesson texts compiled into the binary

/// `(topic id, markdown)` pairs, one per lesson file under `lessons/`
pub static EMBEDDED: &[(&str, &str)] = &[
    ("m1-builtin", include_str!("../../lessons/modulo-1/builtin.md")),
    ("m1-exec", include_str!("../../lessons/modulo-1/exec.md")),
    ("m1-hello", include_str!("../../lessons/modulo-1/hello.md")),
    ("m1-install", include_str!("../../lessons/modulo-1/install.md")),
    ("m1-reserved", include_str!("../../lessons/modulo-1/reserved.md")),
    ("m1-scope", include_str!("../../lessons/modulo-1/scope.md")),
    ("m1-syntax", include_str!("../../lessons/modulo-1/syntax.md")),
    ("m1-typing", include_str!("../../lessons/modulo-1/typing.md")),
    ("m1-unpacking", include_str!("../../lessons/modulo-1/unpacking.md")),
    ("m1-vars", include_str!("../../lessons/modulo-1/vars.md")),
    ("m1-what-is", include_str!("../../lessons/modulo-1/what-is.md")),
    ("m2-break", include_str!("../../lessons/modulo-2/break.md")),
    ("m2-continue", include_str!("../../lessons/modulo-2/continue.md")),
    ("m2-enumerate", include_str!("../../lessons/modulo-2/enumerate.md")),
    ("m2-for", include_str!("../../lessons/modulo-2/for.md")),
    ("m2-if", include_str!("../../lessons/modulo-2/if.md")),
    ("m2-iterators", include_str!("../../lessons/modulo-2/iterators.md")),
    ("m2-listcomp", include_str!("../../lessons/modulo-2/listcomp.md")),
    ("m2-match", include_str!("../../lessons/modulo-2/match.md")),
    ("m2-range", include_str!("../../lessons/modulo-2/range.md")),
    ("m2-switch", include_str!("../../lessons/modulo-2/switch.md")),
    ("m2-while", include_str!("../../lessons/modulo-2/while.md")),
    ("m2-zip", include_str!("../../lessons/modulo-2/zip.md")),
    ("m3-bool", include_str!("../../lessons/modulo-3/bool.md")),
    ("m3-castings", include_str!("../../lessons/modulo-3/castings.md")),
    ("m3-collections", include_str!("../../lessons/modulo-3/collections.md")),
    ("m3-complex", include_str!("../../lessons/modulo-3/complex.md")),
    ("m3-int", include_str!("../../lessons/modulo-3/int.md")),
    ("m4-assign", include_str!("../../lessons/modulo-4/assign.md")),
    ("m4-bitwise", include_str!("../../lessons/modulo-4/bitwise.md")),
    ("m4-identity", include_str!("../../lessons/modulo-4/identity.md")),
    ("m4-log", include_str!("../../lessons/modulo-4/log.md")),
    ("m4-member", include_str!("../../lessons/modulo-4/member.md")),
    ("m4-rel", include_str!("../../lessons/modulo-4/rel.md")),
    ("m4-walrus", include_str!("../../lessons/modulo-4/walrus.md")),
    ("m5-annot", include_str!("../../lessons/modulo-5/annot.md")),
    ("m5-args", include_str!("../../lessons/modulo-5/args.md")),
    ("m5-cache", include_str!("../../lessons/modulo-5/cache.md")),
    ("m5-coro", include_str!("../../lessons/modulo-5/coro.md")),
    ("m5-deco", include_str!("../../lessons/modulo-5/deco.md")),
    ("m5-funcprog", include_str!("../../lessons/modulo-5/funcprog.md")),
    ("m5-funcs", include_str!("../../lessons/modulo-5/funcs.md")),
    ("m5-gen", include_str!("../../lessons/modulo-5/gen.md")),
    ("m5-lambda", include_str!("../../lessons/modulo-5/lambda.md")),
    ("m5-pass", include_str!("../../lessons/modulo-5/pass.md")),
    ("m5-recur", include_str!("../../lessons/modulo-5/recur.md")),
    ("m6-abc", include_str!("../../lessons/modulo-6/abc.md")),
    ("m6-abstract", include_str!("../../lessons/modulo-6/abstract.md")),
    ("m6-class", include_str!("../../lessons/modulo-6/class.md")),
    ("m6-cohesion", include_str!("../../lessons/modulo-6/cohesion.md")),
    ("m6-coupling", include_str!("../../lessons/modulo-6/coupling.md")),
    ("m6-dunder", include_str!("../../lessons/modulo-6/dunder.md")),
    ("m6-encap", include_str!("../../lessons/modulo-6/encap.md")),
    ("m6-inh", include_str!("../../lessons/modulo-6/inh.md")),
    ("m6-methods", include_str!("../../lessons/modulo-6/methods.md")),
    ("m6-oop", include_str!("../../lessons/modulo-6/oop.md")),
    ("m6-override", include_str!("../../lessons/modulo-6/override.md")),
    ("m6-poly", include_str!("../../lessons/modulo-6/poly.md")),
    ("m6-prop", include_str!("../../lessons/modulo-6/prop.md")),
    ("m7-assert", include_str!("../../lessons/modulo-7/assert.md")),
    ("m7-ctx", include_str!("../../lessons/modulo-7/ctx.md")),
    ("m7-define", include_str!("../../lessons/modulo-7/define.md")),
    ("m7-ex", include_str!("../../lessons/modulo-7/ex.md")),
    ("m8-read", include_str!("../../lessons/modulo-8/read.md")),
    ("m8-write", include_str!("../../lessons/modulo-8/write.md")),
    ("m9-math", include_str!("../../lessons/modulo-9/math.md")),
    ("m9-numpy", include_str!("../../lessons/modulo-9/numpy.md")),
    ("m9-plt", include_str!("../../lessons/modulo-9/plt.md")),
    ("m10-modules", include_str!("../../lessons/modulo-10/modules.md")),
];

/// Markdown registered for a topic id
pub fn embedded(topic_id: &str) -> Option<&'static str> {
    EMBEDDED.iter().find(|(id, _)| *id == topic_id).map(|(_, markdown)| *markdown)
}
