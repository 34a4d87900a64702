//! Instruction sequences for operators that the target machine has no
//! single instruction for.
//!
//! Every function takes the left operand register (which receives the
//! result, except for comparisons) and the right operand register (which is
//! only read). Functions that branch take a tag and use it in every label
//! they create, so two expansions with different tags never share labels.
use crate::emit::{Condition, Emitter, Label};
use crate::registers::Register;

/// Which result of a division to keep in the left register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionResult {
    Quotient,
    Remainder,
}

/// Bitwise OR through De Morgan: `NOT (NOR l r)`.
pub fn or(emitter: &mut Emitter, left: Register, right: Register) {
    emitter.emit_nor(left, right, left);
    emitter.emit_not(left, left);
}

/// Logical left shift of `left` by `right` places, one place per loop turn.
///
/// ```text
///     MOV right COUNTER
/// .lsh_loop_N
///     CMP COUNTER r0
///     BRH EQ .end_lsh_N
///     LSH left left
///     DEC COUNTER
///     JMP .lsh_loop_N
/// .end_lsh_N
/// ```
pub fn shift_left(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let top = Label::new("lsh_loop", tag);
    let end = Label::new("end_lsh", tag);
    shift_loop(emitter, right, top, end, |emitter| emitter.emit_lsh(left, left));
}

/// Logical right shift of `left` by `right` places. Same shape as
/// [`shift_left`] with its own labels.
pub fn shift_right(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let top = Label::new("rsh_loop", tag);
    let end = Label::new("end_rsh", tag);
    shift_loop(emitter, right, top, end, |emitter| emitter.emit_rsh(left, left));
}

fn shift_loop(
    emitter: &mut Emitter,
    count: Register,
    top: Label,
    end: Label,
    step: impl Fn(&mut Emitter),
) {
    emitter.emit_mov(count, Register::COUNTER);
    emitter.bind_label(top);
    emitter.emit_cmp(Register::COUNTER, Register::ZERO);
    emitter.emit_brh(Condition::Eq, end);
    step(emitter);
    emitter.emit_dec(Register::COUNTER);
    emitter.emit_jmp(top);
    emitter.bind_label(end);
}

/// Unsigned multiplication by repeated addition.
///
/// ```text
///     LDI TEMPORAL 0
///     CMP left r0
///     BRH EQ .end_mul_N
///     MOV right COUNTER
/// .mul_loop_N
///     CMP COUNTER r0
///     BRH EQ .end_mul_N
///     ADD TEMPORAL left TEMPORAL
///     DEC COUNTER
///     JMP .mul_loop_N
/// .end_mul_N
///     MOV TEMPORAL left
/// ```
pub fn multiply(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let top = Label::new("mul_loop", tag);
    let end = Label::new("end_mul", tag);

    emitter.emit_ldi(Register::TEMPORAL, "0");
    emitter.emit_cmp(left, Register::ZERO);
    emitter.emit_brh(Condition::Eq, end);
    emitter.emit_mov(right, Register::COUNTER);
    emitter.bind_label(top);
    emitter.emit_cmp(Register::COUNTER, Register::ZERO);
    emitter.emit_brh(Condition::Eq, end);
    emitter.emit_add(Register::TEMPORAL, left, Register::TEMPORAL);
    emitter.emit_dec(Register::COUNTER);
    emitter.emit_jmp(top);
    emitter.bind_label(end);
    emitter.emit_mov(Register::TEMPORAL, left);
}

/// Unsigned division by repeated subtraction.
///
/// The loop subtracts `right` from `left` while `left >= right` and counts
/// the subtractions in TEMPORAL. Afterwards TEMPORAL holds the quotient and
/// `left` the remainder. A zero divisor skips the loop: the quotient is 0
/// and the remainder is the dividend.
///
/// ```text
///     LDI TEMPORAL 0
///     CMP right r0
///     BRH EQ .end_div_N
/// .div_loop_N
///     CMP left right
///     BRH LT .end_div_N
///     SUB left right left
///     INC TEMPORAL
///     JMP .div_loop_N
/// .end_div_N
///     MOV TEMPORAL left        (quotient only)
/// ```
pub fn divide(
    emitter: &mut Emitter,
    left: Register,
    right: Register,
    tag: usize,
    keep: DivisionResult,
) {
    let top = Label::new("div_loop", tag);
    let end = Label::new("end_div", tag);

    emitter.emit_ldi(Register::TEMPORAL, "0");
    emitter.emit_cmp(right, Register::ZERO);
    emitter.emit_brh(Condition::Eq, end);
    emitter.bind_label(top);
    emitter.emit_cmp(left, right);
    emitter.emit_brh(Condition::Lt, end);
    emitter.emit_sub(left, right, left);
    emitter.emit_inc(Register::TEMPORAL);
    emitter.emit_jmp(top);
    emitter.bind_label(end);
    if keep == DivisionResult::Quotient {
        emitter.emit_mov(Register::TEMPORAL, left);
    }
}

/// Sets FLAGS to 1 when `left >= right` (unsigned), otherwise to 0.
///
/// ```text
///     CMP left right
///     BRH GE .ge_true_N
///     LDI FLAGS 0
///     JMP .end_ge_N
/// .ge_true_N
///     LDI FLAGS 1
/// .end_ge_N
/// ```
pub fn greater_equal(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let set_true = Label::new("ge_true", tag);
    let end = Label::new("end_ge", tag);

    emitter.emit_cmp(left, right);
    emitter.emit_brh(Condition::Ge, set_true);
    select_flag(emitter, "0", "1", set_true, end);
}

/// Sets FLAGS to 1 when `left > right` (unsigned), otherwise to 0.
///
/// Falling through both branches means neither less nor equal.
pub fn greater(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let set_false = Label::new("gt_false", tag);
    let end = Label::new("end_gt", tag);

    emitter.emit_cmp(left, right);
    emitter.emit_brh(Condition::Lt, set_false);
    emitter.emit_brh(Condition::Eq, set_false);
    select_flag(emitter, "1", "0", set_false, end);
}

/// Sets FLAGS to 1 when `left == right`, otherwise to 0.
pub fn equal(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let set_true = Label::new("eq_true", tag);
    let end = Label::new("end_eq", tag);

    emitter.emit_cmp(left, right);
    emitter.emit_brh(Condition::Eq, set_true);
    select_flag(emitter, "0", "1", set_true, end);
}

/// Sets FLAGS to 1 when `left != right`, otherwise to 0.
pub fn not_equal(emitter: &mut Emitter, left: Register, right: Register, tag: usize) {
    let set_false = Label::new("ne_false", tag);
    let end = Label::new("end_ne", tag);

    emitter.emit_cmp(left, right);
    emitter.emit_brh(Condition::Eq, set_false);
    select_flag(emitter, "1", "0", set_false, end);
}

/// Emits the two-way tail shared by the comparisons: the fall-through path
/// loads `fallthrough`, the branch target loads `branched`.
fn select_flag(
    emitter: &mut Emitter,
    fallthrough: &str,
    branched: &str,
    target: Label,
    end: Label,
) {
    emitter.emit_ldi(Register::FLAGS, fallthrough);
    emitter.emit_jmp(end);
    emitter.bind_label(target);
    emitter.emit_ldi(Register::FLAGS, branched);
    emitter.bind_label(end);
}
